use crate::{ControlAxis, NUM_AXES};
use nalgebra::SVector;
use num_traits::Float;

/// Control axes the actuators could not fully achieve in the last allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisLimits<const A: usize> {
    pub limited: [bool; A],
}

impl<const A: usize> AxisLimits<A> {
    /// Flag every axis whose deficit magnitude exceeds `tolerance`.
    pub fn from_deficit(deficit: &SVector<f32, A>, tolerance: f32) -> Self {
        Self {
            limited: core::array::from_fn(|axis| Float::abs(deficit[axis]) > tolerance),
        }
    }

    pub fn is_limited(&self, axis: impl Into<usize>) -> bool {
        self.limited.get(axis.into()).copied().unwrap_or(false)
    }

    pub fn any(&self) -> bool {
        self.limited.iter().any(|&limited| limited)
    }
}

impl<const A: usize> Default for AxisLimits<A> {
    fn default() -> Self {
        Self { limited: [false; A] }
    }
}

impl AxisLimits<NUM_AXES> {
    pub fn roll(&self) -> bool {
        self.is_limited(ControlAxis::Roll)
    }

    pub fn pitch(&self) -> bool {
        self.is_limited(ControlAxis::Pitch)
    }

    pub fn yaw(&self) -> bool {
        self.is_limited(ControlAxis::Yaw)
    }

    pub fn thrust(&self) -> bool {
        self.is_limited(ControlAxis::ThrustX)
            || self.is_limited(ControlAxis::ThrustY)
            || self.is_limited(ControlAxis::ThrustZ)
    }
}
