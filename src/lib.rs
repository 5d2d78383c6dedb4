pub mod utils;
pub mod models;
pub mod interactions;
pub mod simulation;

pub use utils::{
    IntegrationMethod, PhysicsError, SimulationConfig, Matrix3, Vector3,
    DEFAULT_SIMULATION_CONFIG, STANDARD_GRAVITY,
};
pub use models::{BodyInit, BodyState, Geometry, RigidBody};
pub use simulation::{FrameReport, Simulation, SimulationStats};

/// ### General helper function
/// - Asserts that two floating point numbers are approximately equal.
///
/// ### Arguments
///
/// * `a` - The first floating point number.
/// * `b` - The second floating point number.
/// * `epsilon` - The maximum difference between `a` and `b` for them to be considered equal.
/// * `optional_message` - An optional message to display if the assertion fails.
///
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64, optional_message: Option<&str>) {
    match optional_message {
        Some(message) => assert!((a - b).abs() < epsilon, "a: {:?},\nb: {:?},\nepsilon: {:?},\n message: {:?}", a, b, epsilon, message),
        None => assert!((a - b).abs() < epsilon, "Expected {} to be approximately equal to {} (epsilon: {})", a, b, epsilon),
    }
}

/// Asserts that two vectors are component-wise approximately equal.
pub fn assert_vector_eq(a: Vector3, b: Vector3, epsilon: f64, optional_message: Option<&str>) {
    assert_float_eq(a.0, b.0, epsilon, optional_message);
    assert_float_eq(a.1, b.1, epsilon, optional_message);
    assert_float_eq(a.2, b.2, epsilon, optional_message);
}
