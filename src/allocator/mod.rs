use crate::{geninv::geninv_with_rank, ActuatorBounds, AxisPriority, NUM_AXES};
use nalgebra::{SMatrix, SVector};
use tracing::{debug, trace, warn};

mod builder;
pub use builder::Builder;

pub mod desaturation;
use desaturation::desaturate;

mod limit;
pub use limit::AxisLimits;

/// Allocator for the standard six-axis multirotor control vector (see [`ControlAxis`](crate::ControlAxis)).
pub type MultirotorAllocator<const N: usize> = ControlAllocator<NUM_AXES, N>;

/// Control allocator for `A` control axes and `N` actuators.
///
/// The effectiveness matrix `B` maps actuator outputs to control and the allocation matrix
/// is its generalized inverse. Each call to [`allocate`](Self::allocate) inverts the current
/// control setpoint, desaturates the result axis by axis in priority order, clips it to the
/// actuator bounds and reports the control the clipped command actually achieves.
#[derive(Clone, Debug)]
pub struct ControlAllocator<const A: usize, const N: usize> {
    /// Effectiveness matrix, `A x N`
    effectiveness: SMatrix<f32, A, N>,

    /// Generalized inverse of the effectiveness matrix, `N x A`
    allocation: SMatrix<f32, N, A>,

    /// Numerical rank of the effectiveness matrix
    rank: usize,

    bounds: ActuatorBounds<N>,

    priority: AxisPriority<A>,

    /// Desired control for the next allocation
    control_sp: SVector<f32, A>,

    /// Actuator command produced by the last allocation
    actuator_sp: SVector<f32, N>,

    /// Control achieved by the clipped actuator command
    control_allocated: SVector<f32, A>,
}

impl<const A: usize, const N: usize> ControlAllocator<A, N> {
    /// Create an allocator with normalized `[0, 1]` actuator bounds and axes prioritized by index.
    pub fn new(effectiveness: SMatrix<f32, A, N>) -> Self {
        let mut allocator = Self {
            effectiveness: SMatrix::zeros(),
            allocation: SMatrix::zeros(),
            rank: 0,
            bounds: ActuatorBounds::default(),
            priority: AxisPriority::default(),
            control_sp: SVector::zeros(),
            actuator_sp: SVector::zeros(),
            control_allocated: SVector::zeros(),
        };
        allocator.set_effectiveness_matrix(effectiveness);
        allocator
    }

    pub fn builder() -> Builder<A, N> {
        Builder::default()
    }

    /// Replace the effectiveness matrix and recompute the allocation matrix from it.
    ///
    /// Rank-deficient matrices are accepted, the allocation matrix becomes the
    /// minimum-norm least-squares inverse. A lost actuator is modeled by zeroing its column.
    pub fn set_effectiveness_matrix(&mut self, effectiveness: SMatrix<f32, A, N>) {
        let (allocation, rank) = geninv_with_rank(&effectiveness);

        if rank < self.rank {
            warn!(
                rank,
                previous_rank = self.rank,
                "effectiveness matrix lost rank"
            );
        } else {
            debug!(rank, "effectiveness matrix updated");
        }

        self.effectiveness = effectiveness;
        self.allocation = allocation;
        self.rank = rank;
    }

    pub fn effectiveness_matrix(&self) -> &SMatrix<f32, A, N> {
        &self.effectiveness
    }

    pub fn allocation_matrix(&self) -> &SMatrix<f32, N, A> {
        &self.allocation
    }

    pub fn effectiveness_rank(&self) -> usize {
        self.rank
    }

    pub fn set_actuator_bounds(&mut self, bounds: ActuatorBounds<N>) {
        debug!(min = ?bounds.min().as_slice(), max = ?bounds.max().as_slice(), "actuator bounds updated");
        self.bounds = bounds;
    }

    pub fn actuator_bounds(&self) -> &ActuatorBounds<N> {
        &self.bounds
    }

    pub fn set_axis_priority(&mut self, priority: AxisPriority<A>) {
        debug!(order = ?priority.as_array(), "axis priority updated");
        self.priority = priority;
    }

    pub fn axis_priority(&self) -> &AxisPriority<A> {
        &self.priority
    }

    pub fn set_control_setpoint(&mut self, control_sp: SVector<f32, A>) {
        self.control_sp = control_sp;
    }

    pub fn control_setpoint(&self) -> &SVector<f32, A> {
        &self.control_sp
    }

    /// Compute the actuator setpoint for the current control setpoint.
    pub fn allocate(&mut self) {
        // Unconstrained minimum-norm solution, may be out of bounds
        let mut actuator_sp = self.allocation * self.control_sp;

        // Lowest priority first so higher priority axes get the last correction
        for axis in &self.priority {
            actuator_sp = desaturate(actuator_sp, &self.desaturation_vector(axis), &self.bounds);
        }

        self.output(actuator_sp);
    }

    /// Command the actuators directly, bypassing allocation.
    ///
    /// The command is clipped to the actuator bounds and the achieved control is updated.
    pub fn set_actuator_setpoint(&mut self, actuator_sp: SVector<f32, N>) {
        self.output(actuator_sp);
    }

    pub fn actuator_setpoint(&self) -> &SVector<f32, N> {
        &self.actuator_sp
    }

    /// Control produced by the current actuator setpoint.
    pub fn allocated_control(&self) -> &SVector<f32, A> {
        &self.control_allocated
    }

    /// Requested control the actuators could not produce.
    pub fn control_deficit(&self) -> SVector<f32, A> {
        self.control_sp - self.control_allocated
    }

    pub fn limits(&self, tolerance: f32) -> AxisLimits<A> {
        AxisLimits::from_deficit(&self.control_deficit(), tolerance)
    }

    /// Actuator-space direction used to desaturate `axis`: its column of the allocation matrix.
    ///
    /// # Panics
    /// If `axis >= A`.
    pub fn desaturation_vector(&self, axis: usize) -> SVector<f32, N> {
        self.allocation.column(axis).into_owned()
    }

    fn output(&mut self, actuator_sp: SVector<f32, N>) {
        let clipped = self.bounds.clip(actuator_sp);

        let clipped_count = (0..N).filter(|&i| clipped[i] != actuator_sp[i]).count();
        if clipped_count > 0 {
            trace!(clipped_count, "actuator setpoint clipped to bounds");
        }

        self.actuator_sp = clipped;
        self.control_allocated = self.effectiveness * self.actuator_sp;
    }
}

impl<const N: usize> ControlAllocator<NUM_AXES, N> {
    /// Create a six-axis allocator that gives up yaw first and protects vertical thrust the most.
    pub fn multirotor(effectiveness: SMatrix<f32, NUM_AXES, N>) -> Self {
        let mut allocator = Self::new(effectiveness);
        allocator.priority = AxisPriority::multirotor();
        allocator
    }
}
