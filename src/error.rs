use thiserror::Error;

/// A configuration error rejected before it reaches the allocator.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    /// An axis index in a priority order is not a valid control axis.
    #[error("axis {axis} is out of range for {num_axes} control axes")]
    AxisOutOfRange { axis: usize, num_axes: usize },

    /// An axis appears more than once in a priority order.
    #[error("axis {0} appears more than once in the priority order")]
    DuplicateAxis(usize),

    /// An actuator's minimum output is above its maximum.
    #[error("actuator {actuator} has inverted bounds [{min}, {max}]")]
    InvertedBounds { actuator: usize, min: f32, max: f32 },

    /// An actuator bound is NaN or infinite.
    #[error("actuator {actuator} has a non-finite bound")]
    NonFiniteBound { actuator: usize },

    /// The allocator was built without an effectiveness matrix.
    #[error("missing effectiveness matrix")]
    MissingEffectiveness,
}
