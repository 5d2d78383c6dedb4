use log::{debug, error};
use crate::models::{BodyState, Geometry, MassProperties, StateDerivative};
use crate::utils::{
    add_vectors, cross_product, dot_product, matrix_multiply, matrix_vector_multiply,
    orthonormalize, rotate_tensor, scale_vector, skew_symmetric, IntegrationMethod, Matrix3,
    PhysicsError, SimulationConfig, Vector3, DEFAULT_SIMULATION_CONFIG, IDENTITY_MATRIX,
    ZERO_VECTOR,
};

/// Initial conditions for a new body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyInit {
    /// World position of the center of mass.
    pub position: Vector3,
    /// Must be orthonormal.
    pub orientation: Matrix3,
    pub velocity: Vector3,
    pub angular_velocity: Vector3,
    /// Coefficient of restitution in `[0, 1]`.
    pub restitution: f64,
}

impl Default for BodyInit {
    fn default() -> Self {
        BodyInit {
            position: ZERO_VECTOR,
            orientation: IDENTITY_MATRIX,
            velocity: ZERO_VECTOR,
            angular_velocity: ZERO_VECTOR,
            restitution: 0.5,
        }
    }
}

impl BodyInit {
    pub fn at(position: Vector3) -> Self {
        BodyInit { position, ..BodyInit::default() }
    }
}

/// A polyhedral rigid body with the two state snapshots continuous collision
/// detection needs.
#[derive(Debug, Clone)]
pub struct RigidBody {
    geometry: Geometry,
    mass_properties: MassProperties,
    restitution: f64,
    state: BodyState,
    previous_state: BodyState,
    world_vertices: Vec<Vector3>,
    previous_world_vertices: Vec<Vector3>,
}

impl RigidBody {
    /// Builds a body, recentering `geometry` on its sampled center of mass.
    ///
    /// # Arguments
    /// * `geometry` - Closed, outward-facing triangle mesh.
    /// * `mass` - Mass in kilograms.
    /// * `init` - Initial position, orientation, velocities and restitution.
    /// * `sample_resolution` - Grid subdivisions per axis for mass sampling.
    ///
    /// # Errors
    /// Any error from [`MassProperties::derive`], or `PhysicsError::InvalidCoefficient`
    /// for a restitution outside `[0, 1]`.
    pub fn new(
        mut geometry: Geometry,
        mass: f64,
        init: BodyInit,
        sample_resolution: usize,
    ) -> Result<Self, PhysicsError> {
        if !(0.0..=1.0).contains(&init.restitution) {
            error!("Rejected body with restitution {}", init.restitution);
            return Err(PhysicsError::InvalidCoefficient);
        }

        let mass_properties = MassProperties::derive(&mut geometry, mass, sample_resolution)
            .map_err(|e| {
                error!("Rejected body: {}", e);
                e
            })?;

        let world_inertia = rotate_tensor(&init.orientation, &mass_properties.inertia);
        let state = BodyState {
            position: init.position,
            linear_momentum: scale_vector(init.velocity, mass),
            orientation: init.orientation,
            angular_momentum: matrix_vector_multiply(&world_inertia, init.angular_velocity),
        };

        let mut body = RigidBody {
            world_vertices: vec![ZERO_VECTOR; geometry.vertices().len()],
            previous_world_vertices: Vec::new(),
            geometry,
            mass_properties,
            restitution: init.restitution,
            state,
            previous_state: state,
        };
        body.update_world_vertices();
        body.previous_world_vertices = body.world_vertices.clone();

        debug!("Created body of mass {} with {} faces at {:?}", mass, body.geometry.faces().len(), init.position);
        Ok(body)
    }

    /// Builds a body with the default sampling resolution.
    pub fn from_geometry(geometry: Geometry, mass: f64, init: BodyInit) -> Result<Self, PhysicsError> {
        Self::new(geometry, mass, init, DEFAULT_SIMULATION_CONFIG.sample_resolution)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn mass_properties(&self) -> &MassProperties {
        &self.mass_properties
    }

    pub fn mass(&self) -> f64 {
        self.mass_properties.mass
    }

    pub fn inverse_mass(&self) -> f64 {
        1.0 / self.mass_properties.mass
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn previous_state(&self) -> &BodyState {
        &self.previous_state
    }

    pub fn position(&self) -> Vector3 {
        self.state.position
    }

    pub fn orientation(&self) -> &Matrix3 {
        &self.state.orientation
    }

    pub fn velocity(&self) -> Vector3 {
        scale_vector(self.state.linear_momentum, self.inverse_mass())
    }

    pub fn angular_velocity(&self) -> Vector3 {
        matrix_vector_multiply(&self.world_inverse_inertia(), self.state.angular_momentum)
    }

    pub fn world_vertices(&self) -> &[Vector3] {
        &self.world_vertices
    }

    pub fn previous_world_vertices(&self) -> &[Vector3] {
        &self.previous_world_vertices
    }

    /// World-space inverse inertia `R · I₀⁻¹ · Rᵗ` at the current orientation.
    pub fn world_inverse_inertia(&self) -> Matrix3 {
        self.world_inverse_inertia_at(&self.state.orientation)
    }

    fn world_inverse_inertia_at(&self, orientation: &Matrix3) -> Matrix3 {
        rotate_tensor(orientation, &self.mass_properties.inverse_inertia)
    }

    pub fn kinetic_energy(&self) -> f64 {
        let linear = dot_product(self.state.linear_momentum, self.state.linear_momentum) * 0.5 * self.inverse_mass();
        let angular = 0.5 * dot_product(self.angular_velocity(), self.state.angular_momentum);
        linear + angular
    }

    /// Rate of change of `state` under constant gravity and no applied torque.
    pub fn compute_derivative(&self, state: &BodyState, gravity: Vector3) -> StateDerivative {
        let angular_velocity = matrix_vector_multiply(
            &self.world_inverse_inertia_at(&state.orientation),
            state.angular_momentum,
        );

        StateDerivative {
            velocity: scale_vector(state.linear_momentum, self.inverse_mass()),
            angular_velocity,
            orientation_rate: matrix_multiply(&skew_symmetric(angular_velocity), &state.orientation),
            force: scale_vector(gravity, self.mass()),
            torque: ZERO_VECTOR,
        }
    }

    /// Advances the current state by `h` and refreshes the world-vertex cache.
    ///
    /// Does not snapshot; call [`RigidBody::snapshot`] first when the previous
    /// state must be kept for collision detection.
    pub fn integrate(&mut self, h: f64, config: &SimulationConfig) {
        let mut next = match config.integration_method {
            IntegrationMethod::Euler => {
                let derivative = self.compute_derivative(&self.state, config.gravity);
                self.state.apply_derivative(&derivative, h)
            }
            IntegrationMethod::Midpoint => {
                let first = self.compute_derivative(&self.state, config.gravity);
                let half_step = self.state.apply_derivative(&first, h / 2.0);
                let second = self.compute_derivative(&half_step, config.gravity);
                self.state.apply_derivative(&second, h)
            }
        };

        if config.orthonormalize_orientation {
            next.orientation = orthonormalize(&next.orientation);
        }

        self.state = next;
        self.update_world_vertices();
    }

    /// Records the current state and vertex cache as the start of a sub-step.
    pub fn snapshot(&mut self) {
        self.previous_state = self.state;
        self.previous_world_vertices.copy_from_slice(&self.world_vertices);
    }

    /// Rolls state and vertex cache back to the last snapshot.
    pub fn restore_to_previous(&mut self) {
        self.state = self.previous_state;
        self.world_vertices.copy_from_slice(&self.previous_world_vertices);
    }

    /// Replaces the current state, e.g. to teleport a body between frames.
    pub fn set_state(&mut self, state: BodyState) {
        self.state = state;
        self.update_world_vertices();
    }

    /// Recomputes `world = position + orientation · local` for every vertex.
    pub fn update_world_vertices(&mut self) {
        let BodyState { position, orientation, .. } = self.state;
        for (world, &local) in self.world_vertices.iter_mut().zip(self.geometry.vertices()) {
            *world = add_vectors(position, matrix_vector_multiply(&orientation, local));
        }
    }

    /// Applies a linear impulse at `contact_arm` from the center of mass.
    pub fn apply_impulse(&mut self, impulse: Vector3, contact_arm: Vector3) {
        self.state.linear_momentum = add_vectors(self.state.linear_momentum, impulse);
        self.state.angular_momentum = add_vectors(
            self.state.angular_momentum,
            cross_product(contact_arm, impulse),
        );
    }

    pub fn scale_angular_momentum(&mut self, factor: f64) {
        self.state.angular_momentum = scale_vector(self.state.angular_momentum, factor);
    }

    /// Current world-space triangles, one entry per face.
    pub fn world_triangles(&self) -> impl Iterator<Item = [Vector3; 3]> + '_ {
        self.geometry
            .faces()
            .iter()
            .map(move |face| face.map(|i| self.world_vertices[i]))
    }

    /// Appends the world-space triangles as flat `x, y, z` triples, nine values per face.
    pub fn write_world_triangles(&self, out: &mut Vec<f64>) {
        out.reserve(self.geometry.faces().len() * 9);
        for triangle in self.world_triangles() {
            for (x, y, z) in triangle {
                out.extend_from_slice(&[x, y, z]);
            }
        }
    }
}
