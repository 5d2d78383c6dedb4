// src/utils/constants_config_tests.rs

use crate::assert_float_eq;
use crate::utils::*;

#[test]
fn test_default_config() {
    let config = SimulationConfig::default();
    assert_eq!(config.integration_method, IntegrationMethod::Midpoint);
    assert_eq!(config.max_iterations, 10);
    assert_eq!(config.sample_resolution, 10);
    assert!(config.ground_contact);
    assert_float_eq(config.gravity.1, -STANDARD_GRAVITY, 1e-12, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_config() {
    let config = SimulationConfig::new(Some(IntegrationMethod::Euler), Some(0.01), None, Some(false), None);
    assert_eq!(config.integration_method, IntegrationMethod::Euler);
    assert_float_eq(config.step_size, 0.01, 1e-12, None);
    assert_eq!(config.max_iterations, DEFAULT_SIMULATION_CONFIG.max_iterations);
    assert!(!config.ground_contact);
    assert_eq!(config.gravity, DEFAULT_SIMULATION_CONFIG.gravity);
}

#[test]
fn test_free_space_config() {
    let config = SimulationConfig::free_space();
    assert_eq!(config.gravity, (0.0, 0.0, 0.0));
    assert!(!config.ground_contact);
}

#[test]
fn test_invalid_configs() {
    let mut config = SimulationConfig::default();
    config.step_size = 0.0;
    assert_eq!(config.validate(), Err(PhysicsError::InvalidTime));

    let mut config = SimulationConfig::default();
    config.step_size = f64::NAN;
    assert_eq!(config.validate(), Err(PhysicsError::InvalidTime));

    let mut config = SimulationConfig::default();
    config.max_iterations = 0;
    assert_eq!(config.validate(), Err(PhysicsError::InvalidIterationCap));

    let mut config = SimulationConfig::default();
    config.sample_resolution = 1;
    assert_eq!(config.validate(), Err(PhysicsError::InvalidResolution));

    let mut config = SimulationConfig::default();
    config.ground_angular_damping = 1.5;
    assert_eq!(config.validate(), Err(PhysicsError::InvalidCoefficient));

    let mut config = SimulationConfig::default();
    config.gravity = (0.0, f64::INFINITY, 0.0);
    assert!(config.validate().is_err());
}
