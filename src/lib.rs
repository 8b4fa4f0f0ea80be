//! # multirotor-allocator
//! A `#![no_std]` control allocation library for multirotors.
//!
//! [`ControlAllocator`] maps a desired control vector (roll, pitch and yaw torque, thrust)
//! to actuator commands through the generalized inverse of an effectiveness matrix
//! (see [`geninv`]). When the motors cannot produce the full demand, the command is
//! desaturated one control axis at a time, lowest [`AxisPriority`] first, then clipped to
//! the [`ActuatorBounds`]. The control the clipped command actually produces is reported back.
//!
//! ```
//! use approx::assert_relative_eq;
//! use multirotor_allocator::{ControlAxis, MultirotorAllocator};
//! use nalgebra::{SMatrix, Vector4, Vector6};
//!
//! // Quad-X: roll, pitch, yaw, thrust x, thrust y, thrust z
//! let effectiveness = SMatrix::<f32, 6, 4>::from_row_slice(&[
//!     -1., 1., 1., -1.,
//!     1., -1., 1., -1.,
//!     1., 1., -1., -1.,
//!     0., 0., 0., 0.,
//!     0., 0., 0., 0.,
//!     1., 1., 1., 1.,
//! ]);
//! let mut allocator = MultirotorAllocator::multirotor(effectiveness);
//!
//! // More roll and thrust than the motors can produce together
//! allocator.set_control_setpoint(Vector6::new(1., 0., 0., 0., 0., 3.6));
//! allocator.allocate();
//!
//! assert_relative_eq!(
//!     *allocator.actuator_setpoint(),
//!     Vector4::new(0.8, 1., 1., 0.8),
//!     epsilon = 1e-5
//! );
//!
//! // Thrust is protected and roll gives way
//! let achieved = allocator.allocated_control();
//! assert_relative_eq!(achieved[ControlAxis::ThrustZ.index()], 3.6, epsilon = 1e-4);
//! assert!(allocator.limits(1e-3).roll());
//! ```

#![no_std]

pub mod allocator;
pub use allocator::{AxisLimits, Builder, ControlAllocator, MultirotorAllocator};

pub mod axis;
pub use axis::{AxisPriority, ControlAxis, NUM_AXES};

pub mod bounds;
pub use bounds::ActuatorBounds;

mod error;
pub use error::Error;

pub mod geninv;
pub use geninv::geninv;
