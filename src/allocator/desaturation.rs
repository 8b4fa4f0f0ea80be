use crate::ActuatorBounds;
use nalgebra::SVector;
use num_traits::Float;

/// Scale the desaturation vector by this after the full correction.
const HALF_STEP: f32 = 0.5;

/// Compute the gain along `direction` that pulls saturated actuators back toward their bounds.
///
/// Each out-of-range actuator gives the step `k` that would land it exactly on the violated
/// bound. The most negative and most positive steps are summed, so violations on both sides
/// of the range partially cancel instead of either side being fully corrected.
/// Actuators with a direction component below `f32::EPSILON` cannot be moved along
/// `direction` and are skipped.
pub fn desaturation_gain<const N: usize>(
    direction: &SVector<f32, N>,
    actuator_sp: &SVector<f32, N>,
    bounds: &ActuatorBounds<N>,
) -> f32 {
    let mut k_min = 0f32;
    let mut k_max = 0f32;

    for i in 0..N {
        if Float::abs(direction[i]) < f32::EPSILON {
            continue;
        }

        let bound = if actuator_sp[i] < bounds.min()[i] {
            bounds.min()[i]
        } else if actuator_sp[i] > bounds.max()[i] {
            bounds.max()[i]
        } else {
            continue;
        };

        let k = (bound - actuator_sp[i]) / direction[i];
        k_min = k_min.min(k);
        k_max = k_max.max(k);
    }

    k_min + k_max
}

/// Move `actuator_sp` along `direction` to reduce saturation.
///
/// A full correction is applied first, then the gain is recomputed and half of it applied.
/// The result is not guaranteed to be within bounds.
pub fn desaturate<const N: usize>(
    mut actuator_sp: SVector<f32, N>,
    direction: &SVector<f32, N>,
    bounds: &ActuatorBounds<N>,
) -> SVector<f32, N> {
    let gain = desaturation_gain(direction, &actuator_sp, bounds);
    actuator_sp += direction * gain;

    let gain = desaturation_gain(direction, &actuator_sp, bounds);
    actuator_sp += direction * (HALF_STEP * gain);

    actuator_sp
}
