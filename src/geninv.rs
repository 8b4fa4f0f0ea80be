//! Generalized (Moore-Penrose) inverse of a fixed-size matrix.
//!
//! The inverse is built from a rank-revealing Cholesky factorization of the smaller Gram
//! matrix, so rank-deficient and non-square inputs yield the minimum-norm least-squares
//! inverse instead of failing.

use nalgebra::SMatrix;
use num_traits::Float;

/// Returns the generalized inverse `G⁺` of `g`.
pub fn geninv<const M: usize, const N: usize>(g: &SMatrix<f32, M, N>) -> SMatrix<f32, N, M> {
    geninv_with_rank(g).0
}

/// Returns the generalized inverse `G⁺` of `g` along with the numerical rank of `g`.
///
/// ```
/// use multirotor_allocator::geninv::geninv_with_rank;
/// use nalgebra::Matrix2;
/// use approx::assert_relative_eq;
///
/// let (inv, rank) = geninv_with_rank(&Matrix2::new(2., 0., 2., 0.));
///
/// assert_eq!(rank, 1);
/// assert_relative_eq!(inv, Matrix2::new(0.25, 0.25, 0., 0.), epsilon = 1e-6);
/// ```
pub fn geninv_with_rank<const M: usize, const N: usize>(
    g: &SMatrix<f32, M, N>,
) -> (SMatrix<f32, N, M>, usize) {
    if M <= N {
        // Wide (or square): G⁺ = Gᵀ L (LᵀL)⁻² Lᵀ with L Lᵀ = G Gᵀ
        let (l, rank) = full_rank_cholesky(&(g * g.transpose()));
        let y = gram_inverse_squared(&l, rank);
        (g.transpose() * l * y * l.transpose(), rank)
    } else {
        // Tall: G⁺ = L (LᵀL)⁻² Lᵀ Gᵀ with L Lᵀ = Gᵀ G
        let (l, rank) = full_rank_cholesky(&(g.transpose() * g));
        let y = gram_inverse_squared(&l, rank);
        (l * y * l.transpose() * g.transpose(), rank)
    }
}

/// Rank-revealing Cholesky factorization of a symmetric positive semi-definite matrix.
///
/// Returns `L` with `L Lᵀ = a` and the rank `r`. Only the first `r` columns of `L` are
/// non-zero; pivots at or below `D * ε * max(diag(a))` are treated as linearly dependent.
pub fn full_rank_cholesky<const D: usize>(a: &SMatrix<f32, D, D>) -> (SMatrix<f32, D, D>, usize) {
    let max_diag = a.diagonal().iter().fold(0f32, |acc, &x| acc.max(x));
    let tol = D as f32 * f32::EPSILON * max_diag;

    let mut l = SMatrix::<f32, D, D>::zeros();
    let mut rank = 0;

    for k in 0..D {
        for i in k..D {
            let mut ll = 0.;
            for j in 0..rank {
                ll += l[(i, j)] * l[(k, j)];
            }
            l[(i, rank)] = a[(i, k)] - ll;
        }

        if l[(k, rank)] > tol {
            let pivot = Float::sqrt(l[(k, rank)]);
            l[(k, rank)] = pivot;
            for i in k + 1..D {
                l[(i, rank)] /= pivot;
            }
            rank += 1;
        } else {
            // Dependent column, discard it so the next pivot can reuse this slot
            for i in k..D {
                l[(i, rank)] = 0.;
            }
        }
    }

    (l, rank)
}

/// Computes `(LᵀL)⁻²` restricted to the leading `rank` columns of `l`.
///
/// The trailing columns of `l` are zero, so `LᵀL` is block diagonal with a singular zero block.
/// That block is replaced with the identity to invert the leading block, then zeroed again.
fn gram_inverse_squared<const D: usize>(l: &SMatrix<f32, D, D>, rank: usize) -> SMatrix<f32, D, D> {
    let mut gram = l.transpose() * l;
    for i in rank..D {
        gram[(i, i)] = 1.;
    }

    match gram.try_inverse() {
        Some(mut x) => {
            for i in rank..D {
                x[(i, i)] = 0.;
            }
            x * x
        }
        None => {
            tracing::warn!(rank, "gram matrix of the cholesky factor is not invertible");
            SMatrix::zeros()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{full_rank_cholesky, geninv, geninv_with_rank};
    use approx::assert_relative_eq;
    use nalgebra::{Matrix2, Matrix2x3, Matrix3, Matrix3x2, SMatrix};

    #[test]
    fn it_inverts_a_square_matrix() {
        let g = Matrix2::new(2., 1., 1., 3.);
        let (inv, rank) = geninv_with_rank(&g);

        assert_eq!(rank, 2);
        assert_relative_eq!(inv, g.try_inverse().unwrap(), epsilon = 1e-5);
    }

    #[test]
    fn wide_matrix_has_a_right_inverse() {
        let g = Matrix2x3::new(1., -1., 1., 1., 2., 1.);
        let (inv, rank) = geninv_with_rank(&g);

        assert_eq!(rank, 2);
        assert_relative_eq!(g * inv, Matrix2::identity(), epsilon = 1e-5);
        // Rows are orthogonal, so each column is the row scaled by its squared norm
        assert_relative_eq!(
            inv,
            Matrix3x2::new(1. / 3., 1. / 6., -1. / 3., 2. / 6., 1. / 3., 1. / 6.),
            epsilon = 1e-5
        );
    }

    #[test]
    fn tall_matrix_has_a_left_inverse() {
        let g = Matrix3x2::new(1., 0., 0., 1., 1., 1.);
        let (inv, rank) = geninv_with_rank(&g);

        assert_eq!(rank, 2);
        assert_relative_eq!(inv * g, Matrix2::identity(), epsilon = 1e-5);
    }

    #[test]
    fn rank_deficient_matrix_satisfies_penrose_identities() {
        let g = Matrix3::new(1., 2., 2., 2., 4., 4., 1., 0., 1.);
        let (inv, rank) = geninv_with_rank(&g);

        assert_eq!(rank, 2);
        assert_relative_eq!(g * inv * g, g, epsilon = 1e-4);
        assert_relative_eq!(inv * g * inv, inv, epsilon = 1e-4);
        assert_relative_eq!(g * inv, (g * inv).transpose(), epsilon = 1e-4);
        assert_relative_eq!(inv * g, (inv * g).transpose(), epsilon = 1e-4);
    }

    #[test]
    fn zero_matrix_has_zero_inverse() {
        let (inv, rank) = geninv_with_rank(&SMatrix::<f32, 6, 4>::zeros());

        assert_eq!(rank, 0);
        assert_eq!(inv, SMatrix::<f32, 4, 6>::zeros());
    }

    #[test]
    fn quad_x_mixer_inverse_is_scaled_transpose() {
        // Roll, pitch, yaw, thrust x, thrust y, thrust z
        let b = SMatrix::<f32, 6, 4>::from_row_slice(&[
            -1., 1., 1., -1., //
            1., -1., 1., -1., //
            1., 1., -1., -1., //
            0., 0., 0., 0., //
            0., 0., 0., 0., //
            1., 1., 1., 1., //
        ]);
        let a = geninv(&b);

        assert_relative_eq!(a, b.transpose() / 4., epsilon = 1e-6);
        assert_relative_eq!(a * b, SMatrix::<f32, 4, 4>::identity(), epsilon = 1e-5);
    }

    #[test]
    fn cholesky_factor_reconstructs_input() {
        let a = Matrix3::new(4., 2., 0., 2., 5., 1., 0., 1., 3.);
        let (l, rank) = full_rank_cholesky(&a);

        assert_eq!(rank, 3);
        assert_relative_eq!(l * l.transpose(), a, epsilon = 1e-5);
    }
}
