use crate::utils::{IntegrationMethod, SimulationConfig};

/// Standard gravitational acceleration in m/s².
pub const STANDARD_GRAVITY: f64 = 9.80665;

pub const DEFAULT_SIMULATION_CONFIG: SimulationConfig = SimulationConfig {
    integration_method: IntegrationMethod::Midpoint,
    step_size: 1.0 / 60.0,
    max_iterations: 10,
    ground_contact: true,
    gravity: (0.0, -STANDARD_GRAVITY, 0.0),
    ground_impulse_scale: 1.0,
    ground_angular_damping: 1.0,
    orthonormalize_orientation: true,
    sample_resolution: 10,
};
