use multirotor_allocator::{ControlAxis, MultirotorAllocator};
use nalgebra::{SMatrix, Vector6};
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    // Roll, pitch, yaw, thrust x, thrust y, thrust z
    let effectiveness = SMatrix::<f32, 6, 4>::from_row_slice(&[
        -1., 1., 1., -1., //
        1., -1., 1., -1., //
        1., 1., -1., -1., //
        0., 0., 0., 0., //
        0., 0., 0., 0., //
        1., 1., 1., 1., //
    ]);
    let mut allocator = MultirotorAllocator::multirotor(effectiveness);

    // Hold a roll and yaw demand while throttling up into saturation
    for step in 0..=8 {
        let thrust = 0.5 * step as f32;
        allocator.set_control_setpoint(Vector6::new(0.8, 0., 0.3, 0., 0., thrust));
        allocator.allocate();

        let achieved = allocator.allocated_control();
        let limits = allocator.limits(1e-3);
        info!(
            thrust,
            motors = ?allocator.actuator_setpoint().as_slice(),
            roll = achieved[ControlAxis::Roll.index()],
            yaw = achieved[ControlAxis::Yaw.index()],
            thrust_z = achieved[ControlAxis::ThrustZ.index()],
            roll_limited = limits.roll(),
            yaw_limited = limits.yaw(),
            thrust_limited = limits.thrust(),
            "allocated"
        );
    }

    // Motor 2 fails
    let mut failed = effectiveness;
    failed.column_mut(2).fill(0.);
    allocator.set_effectiveness_matrix(failed);

    allocator.set_control_setpoint(Vector6::new(0., 0., 0., 0., 0., 2.));
    allocator.allocate();
    dbg!(allocator.actuator_setpoint(), allocator.control_deficit());
}
