use super::ControlAllocator;
use crate::{ActuatorBounds, AxisPriority, ControlAxis, Error, NUM_AXES};
use nalgebra::{SMatrix, SVector};

pub struct Builder<const A: usize, const N: usize> {
    effectiveness: Option<SMatrix<f32, A, N>>,
    actuator_min: SVector<f32, N>,
    actuator_max: SVector<f32, N>,
    axis_priority: [usize; A],
}

impl<const A: usize, const N: usize> Default for Builder<A, N> {
    fn default() -> Self {
        Self {
            effectiveness: None,
            actuator_min: SVector::zeros(),
            actuator_max: SVector::repeat(1.),
            axis_priority: core::array::from_fn(|axis| axis),
        }
    }
}

impl<const A: usize, const N: usize> Builder<A, N> {
    pub fn effectiveness(mut self, effectiveness: SMatrix<f32, A, N>) -> Self {
        self.effectiveness = Some(effectiveness);
        self
    }

    pub fn actuator_bounds(mut self, min: SVector<f32, N>, max: SVector<f32, N>) -> Self {
        self.actuator_min = min;
        self.actuator_max = max;
        self
    }

    pub fn uniform_bounds(self, min: f32, max: f32) -> Self {
        self.actuator_bounds(SVector::repeat(min), SVector::repeat(max))
    }

    /// Desaturation order as axis indices, lowest priority first.
    pub fn axis_priority(mut self, order: [usize; A]) -> Self {
        self.axis_priority = order;
        self
    }

    /// Validate the configuration and compute the allocation matrix.
    pub fn build(self) -> Result<ControlAllocator<A, N>, Error> {
        let effectiveness = self.effectiveness.ok_or(Error::MissingEffectiveness)?;
        let bounds = ActuatorBounds::new(self.actuator_min, self.actuator_max)?;
        let priority = AxisPriority::new(self.axis_priority)?;

        let mut allocator = ControlAllocator::new(effectiveness);
        allocator.bounds = bounds;
        allocator.priority = priority;
        Ok(allocator)
    }
}

impl<const N: usize> Builder<NUM_AXES, N> {
    pub fn axes(self, axes: [ControlAxis; NUM_AXES]) -> Self {
        self.axis_priority(axes.map(ControlAxis::index))
    }

    pub fn multirotor_priority(self) -> Self {
        self.axis_priority(*AxisPriority::multirotor().as_array())
    }
}
