use crate::utils::{
    add_matrices, add_vectors, scale_matrix, scale_vector, Matrix3, Vector3, IDENTITY_MATRIX,
    ZERO_VECTOR,
};

/// Dynamic state of a rigid body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// World position of the center of mass.
    pub position: Vector3,
    pub linear_momentum: Vector3,
    /// Rotation from body space to world space.
    pub orientation: Matrix3,
    pub angular_momentum: Vector3,
}

/// Time derivative of a [`BodyState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateDerivative {
    pub velocity: Vector3,
    /// Angular velocity the orientation rate was built from.
    pub angular_velocity: Vector3,
    pub orientation_rate: Matrix3,
    pub force: Vector3,
    pub torque: Vector3,
}

impl Default for BodyState {
    fn default() -> Self {
        BodyState {
            position: ZERO_VECTOR,
            linear_momentum: ZERO_VECTOR,
            orientation: IDENTITY_MATRIX,
            angular_momentum: ZERO_VECTOR,
        }
    }
}

impl BodyState {
    /// Explicit Euler step `state + derivative · h`, applied to each field independently.
    ///
    /// # Example
    /// ```
    /// use rs_rigid_body::models::{BodyState, StateDerivative};
    /// use rs_rigid_body::utils::ZERO_MATRIX;
    ///
    /// let state = BodyState::default();
    /// let derivative = StateDerivative {
    ///     velocity: (1.0, 0.0, 0.0),
    ///     angular_velocity: (0.0, 0.0, 0.0),
    ///     orientation_rate: ZERO_MATRIX,
    ///     force: (0.0, -2.0, 0.0),
    ///     torque: (0.0, 0.0, 0.0),
    /// };
    ///
    /// let next = state.apply_derivative(&derivative, 0.5);
    /// assert_eq!(next.position, (0.5, 0.0, 0.0));
    /// assert_eq!(next.linear_momentum, (0.0, -1.0, 0.0));
    /// ```
    pub fn apply_derivative(&self, derivative: &StateDerivative, h: f64) -> BodyState {
        BodyState {
            position: add_vectors(self.position, scale_vector(derivative.velocity, h)),
            linear_momentum: add_vectors(self.linear_momentum, scale_vector(derivative.force, h)),
            orientation: add_matrices(&self.orientation, &scale_matrix(&derivative.orientation_rate, h)),
            angular_momentum: add_vectors(self.angular_momentum, scale_vector(derivative.torque, h)),
        }
    }
}
