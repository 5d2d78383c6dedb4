// src/utils/constants_config.rs
use crate::utils::{
    DEFAULT_SIMULATION_CONFIG,
    PhysicsError,
    Vector3,
};

/// Numerical integration scheme used to advance body state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationMethod {
    /// Single-stage explicit Euler.
    Euler,
    /// Two-stage midpoint (second-order Runge-Kutta).
    Midpoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub integration_method: IntegrationMethod,
    /// Simulated seconds consumed by one call to `Simulation::step_frame`.
    pub step_size: f64,
    /// Upper bound on detect/resolve passes per frame.
    pub max_iterations: usize,
    /// Whether bodies collide with the `y = 0` ground plane.
    pub ground_contact: bool,
    pub gravity: Vector3,
    /// Multiplier on the linear impulse of a ground contact. 1.0 is the physical value.
    pub ground_impulse_scale: f64,
    /// Factor applied to angular momentum after each ground contact. 1.0 disables damping.
    pub ground_angular_damping: f64,
    /// Re-orthonormalize orientation matrices after every integration step.
    pub orthonormalize_orientation: bool,
    /// Grid subdivisions per axis used when sampling mass properties.
    pub sample_resolution: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONFIG
    }
}

impl SimulationConfig {
    pub fn new(
        integration_method: Option<IntegrationMethod>,
        step_size: Option<f64>,
        max_iterations: Option<usize>,
        ground_contact: Option<bool>,
        gravity: Option<Vector3>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONFIG;
        Self {
            integration_method: integration_method.unwrap_or(default.integration_method),
            step_size: step_size.unwrap_or(default.step_size),
            max_iterations: max_iterations.unwrap_or(default.max_iterations),
            ground_contact: ground_contact.unwrap_or(default.ground_contact),
            gravity: gravity.unwrap_or(default.gravity),
            ..default
        }
    }

    /// A configuration with gravity switched off and no ground plane.
    pub fn free_space() -> Self {
        Self {
            gravity: (0.0, 0.0, 0.0),
            ground_contact: false,
            ..DEFAULT_SIMULATION_CONFIG
        }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(PhysicsError::InvalidTime);
        }
        if self.max_iterations == 0 {
            return Err(PhysicsError::InvalidIterationCap);
        }
        if self.sample_resolution < 2 {
            return Err(PhysicsError::InvalidResolution);
        }
        if !self.ground_impulse_scale.is_finite() || self.ground_impulse_scale < 0.0 {
            return Err(PhysicsError::InvalidCoefficient);
        }
        if !(0.0..=1.0).contains(&self.ground_angular_damping) {
            return Err(PhysicsError::InvalidCoefficient);
        }
        let (gx, gy, gz) = self.gravity;
        if !(gx.is_finite() && gy.is_finite() && gz.is_finite()) {
            return Err(PhysicsError::CalculationError("Gravity must be finite".to_string()));
        }
        Ok(())
    }
}
