use log::debug;
use crate::models::Geometry;
use crate::utils::{
    add_matrices, add_vectors, dot_product, invert_matrix, outer_product, scale_matrix,
    scale_vector, subtract_vectors, Matrix3, PhysicsError, Vector3, IDENTITY_MATRIX, ZERO_MATRIX,
    ZERO_VECTOR,
};

/// Mass, inertia and the sampling data they were derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct MassProperties {
    pub mass: f64,
    /// Body-space inertia tensor about the center of mass.
    pub inertia: Matrix3,
    pub inverse_inertia: Matrix3,
    /// Where the center of mass sat in the mesh's original frame.
    pub center_of_mass_offset: Vector3,
    /// Interior sample points, in the recentered frame.
    pub samples: Vec<Vector3>,
}

impl MassProperties {
    /// Samples `geometry`, recenters it on its center of mass and derives the
    /// inertia tensor for a uniform-density body of `mass`.
    ///
    /// # Errors
    /// * `PhysicsError::InvalidMass` for a non-positive or non-finite mass.
    /// * `PhysicsError::NoInteriorSamples` when the grid misses the mesh interior.
    /// * `PhysicsError::SingularInertiaTensor` when the samples are (nearly) coplanar.
    pub fn derive(geometry: &mut Geometry, mass: f64, resolution: usize) -> Result<Self, PhysicsError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass);
        }
        if resolution < 2 {
            return Err(PhysicsError::InvalidResolution);
        }

        let mut samples = geometry.sample_interior(resolution);
        let center_of_mass = compute_center_of_mass(&samples)?;
        recenter(geometry, &mut samples, center_of_mass);

        let inertia = compute_moment_of_inertia(&samples, mass)?;
        let inverse_inertia = invert_matrix(&inertia)?;

        debug!(
            "Derived mass properties from {} samples: center of mass {:?}, inertia diagonal ({:.4}, {:.4}, {:.4})",
            samples.len(), center_of_mass, inertia[0][0], inertia[1][1], inertia[2][2]
        );

        Ok(MassProperties {
            mass,
            inertia,
            inverse_inertia,
            center_of_mass_offset: center_of_mass,
            samples,
        })
    }
}

/// Centroid of the interior samples.
///
/// # Errors
/// Returns `PhysicsError::NoInteriorSamples` for an empty sample set.
pub fn compute_center_of_mass(samples: &[Vector3]) -> Result<Vector3, PhysicsError> {
    if samples.is_empty() {
        return Err(PhysicsError::NoInteriorSamples);
    }
    let sum = samples.iter().fold(ZERO_VECTOR, |acc, &p| add_vectors(acc, p));
    Ok(scale_vector(sum, 1.0 / samples.len() as f64))
}

/// Shifts the geometry and its samples so `center_of_mass` becomes the local origin.
pub fn recenter(geometry: &mut Geometry, samples: &mut [Vector3], center_of_mass: Vector3) {
    let offset = scale_vector(center_of_mass, -1.0);
    geometry.translate(offset);
    for sample in samples.iter_mut() {
        *sample = subtract_vectors(*sample, center_of_mass);
    }
}

/// Second-moment inertia tensor `Σ w·((r·r)E − r⊗r)` with `w = mass / samples`.
///
/// Samples are taken as offsets from the center of mass, so call this after
/// [`recenter`].
///
/// # Errors
/// Returns `PhysicsError::NoInteriorSamples` for an empty sample set.
pub fn compute_moment_of_inertia(samples: &[Vector3], mass: f64) -> Result<Matrix3, PhysicsError> {
    if samples.is_empty() {
        return Err(PhysicsError::NoInteriorSamples);
    }
    let weight = mass / samples.len() as f64;

    let tensor = samples.iter().fold(ZERO_MATRIX, |acc, &r| {
        let contribution = add_matrices(
            &scale_matrix(&IDENTITY_MATRIX, dot_product(r, r)),
            &scale_matrix(&outer_product(r, r), -1.0),
        );
        add_matrices(&acc, &contribution)
    });

    Ok(scale_matrix(&tensor, weight))
}
