use crate::Error;
use nalgebra::SVector;

/// Physical output range of each actuator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActuatorBounds<const N: usize> {
    min: SVector<f32, N>,
    max: SVector<f32, N>,
}

impl<const N: usize> ActuatorBounds<N> {
    pub fn new(min: SVector<f32, N>, max: SVector<f32, N>) -> Result<Self, Error> {
        for actuator in 0..N {
            let (lo, hi) = (min[actuator], max[actuator]);
            if !lo.is_finite() || !hi.is_finite() {
                return Err(Error::NonFiniteBound { actuator });
            }
            if lo > hi {
                return Err(Error::InvertedBounds {
                    actuator,
                    min: lo,
                    max: hi,
                });
            }
        }

        Ok(Self { min, max })
    }

    /// Use the same output range for every actuator.
    pub fn uniform(min: f32, max: f32) -> Result<Self, Error> {
        Self::new(SVector::repeat(min), SVector::repeat(max))
    }

    pub fn min(&self) -> &SVector<f32, N> {
        &self.min
    }

    pub fn max(&self) -> &SVector<f32, N> {
        &self.max
    }

    /// Clamp each actuator output to its range.
    pub fn clip(&self, mut actuator_sp: SVector<f32, N>) -> SVector<f32, N> {
        for i in 0..N {
            actuator_sp[i] = actuator_sp[i].max(self.min[i]).min(self.max[i]);
        }
        actuator_sp
    }

    pub fn contains(&self, actuator_sp: &SVector<f32, N>) -> bool {
        (0..N).all(|i| actuator_sp[i] >= self.min[i] && actuator_sp[i] <= self.max[i])
    }
}

impl<const N: usize> Default for ActuatorBounds<N> {
    /// Normalized throttle range `[0, 1]`.
    fn default() -> Self {
        Self {
            min: SVector::zeros(),
            max: SVector::repeat(1.),
        }
    }
}
