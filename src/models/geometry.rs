use std::f64::consts::PI;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use crate::utils::{
    add_vectors, cross_product, dot_product, subtract_vectors, vector_component, vector_magnitude,
    PhysicsError, Vector3,
};

/// Triangle as three vertex indices, counter-clockwise when seen from outside.
pub type Face = [usize; 3];

/// Undirected edge stored with the smaller index first.
pub type Edge = (usize, usize);

/// Offset applied to the ray origin of the parity test, as a fraction of the
/// bounding-box diagonal, so rays do not graze shared triangle edges.
const RAY_JITTER: (f64, f64) = (1.234_567e-7, 2.718_281e-7);

/// Immutable triangle mesh of a rigid body in its local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    vertices: Vec<Vector3>,
    faces: Vec<Face>,
    edges: Vec<Edge>,
}

impl Geometry {
    /// Builds geometry from vertex positions and 0-based triangle indices.
    ///
    /// Edges are derived from the faces and deduplicated.
    ///
    /// # Errors
    /// * `PhysicsError::EmptyGeometry` when there are no vertices or no faces.
    /// * `PhysicsError::InvalidFaceIndex` when a face references an undeclared vertex.
    /// * `PhysicsError::DegenerateFace` when a face has zero area.
    ///
    /// # Example
    /// ```
    /// use rs_rigid_body::models::Geometry;
    ///
    /// let tetrahedron = Geometry::new(
    ///     vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0), (0.0, 0.0, 1.0)],
    ///     vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    /// ).unwrap();
    ///
    /// assert_eq!(tetrahedron.edges().len(), 6);
    /// ```
    pub fn new(vertices: Vec<Vector3>, faces: Vec<Face>) -> Result<Self, PhysicsError> {
        if vertices.is_empty() || faces.is_empty() {
            return Err(PhysicsError::EmptyGeometry);
        }

        for (face_index, face) in faces.iter().enumerate() {
            for &index in face {
                if index >= vertices.len() {
                    return Err(PhysicsError::InvalidFaceIndex {
                        face: face_index,
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
            let [a, b, c] = face.map(|i| vertices[i]);
            let area = vector_magnitude(cross_product(subtract_vectors(b, a), subtract_vectors(c, a)));
            if area <= f64::EPSILON {
                return Err(PhysicsError::DegenerateFace(face_index));
            }
        }

        let mut edges: Vec<Edge> = faces
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .map(|(i, j)| if i < j { (i, j) } else { (j, i) })
            .collect();
        edges.sort_unstable();
        edges.dedup();

        Ok(Geometry { vertices, faces, edges })
    }

    /// Axis-aligned box centered on the origin.
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Result<Self, PhysicsError> {
        if !(width > 0.0 && height > 0.0 && depth > 0.0) {
            return Err(PhysicsError::CalculationError("Cuboid dimensions must be positive".to_string()));
        }
        let w2 = width / 2.0;
        let h2 = height / 2.0;
        let d2 = depth / 2.0;

        let vertices = vec![
            (-w2, -h2, -d2),
            (w2, -h2, -d2),
            (w2, h2, -d2),
            (-w2, h2, -d2),
            (-w2, -h2, d2),
            (w2, -h2, d2),
            (w2, h2, d2),
            (-w2, h2, d2),
        ];
        let faces = vec![
            [0, 2, 1], [0, 3, 2], // back
            [4, 5, 6], [4, 6, 7], // front
            [0, 1, 5], [0, 5, 4], // bottom
            [3, 7, 6], [3, 6, 2], // top
            [0, 4, 7], [0, 7, 3], // left
            [1, 2, 6], [1, 6, 5], // right
        ];

        Geometry::new(vertices, faces)
    }

    pub fn cube(size: f64) -> Result<Self, PhysicsError> {
        Self::cuboid(size, size, size)
    }

    /// Latitude/longitude sphere with its poles on the Y axis.
    ///
    /// `stacks` is the number of latitude bands (at least 2) and `slices` the
    /// number of longitude segments (at least 3).
    pub fn uv_sphere(radius: f64, stacks: usize, slices: usize) -> Result<Self, PhysicsError> {
        if !(radius > 0.0) || stacks < 2 || slices < 3 {
            return Err(PhysicsError::CalculationError(
                "Sphere needs a positive radius, 2+ stacks and 3+ slices".to_string(),
            ));
        }

        let mut vertices = Vec::with_capacity(2 + (stacks - 1) * slices);
        vertices.push((0.0, radius, 0.0));
        for stack in 1..stacks {
            let theta = PI * stack as f64 / stacks as f64;
            let (sin_theta, cos_theta) = theta.sin_cos();
            for slice in 0..slices {
                let phi = 2.0 * PI * slice as f64 / slices as f64;
                let (sin_phi, cos_phi) = phi.sin_cos();
                vertices.push((radius * sin_theta * cos_phi, radius * cos_theta, radius * sin_theta * sin_phi));
            }
        }
        vertices.push((0.0, -radius, 0.0));

        let top = 0;
        let bottom = vertices.len() - 1;
        let ring = |stack: usize, slice: usize| 1 + (stack - 1) * slices + slice % slices;

        let mut faces = Vec::with_capacity(2 * slices * (stacks - 1));
        for slice in 0..slices {
            faces.push([top, ring(1, slice + 1), ring(1, slice)]);
        }
        for stack in 1..stacks - 1 {
            for slice in 0..slices {
                let upper = ring(stack, slice);
                let upper_next = ring(stack, slice + 1);
                let lower = ring(stack + 1, slice);
                let lower_next = ring(stack + 1, slice + 1);
                faces.push([upper, lower_next, lower]);
                faces.push([upper, upper_next, lower_next]);
            }
        }
        for slice in 0..slices {
            faces.push([bottom, ring(stacks - 1, slice), ring(stacks - 1, slice + 1)]);
        }

        Geometry::new(vertices, faces)
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Corner positions of face `index`.
    pub fn face_vertices(&self, index: usize) -> [Vector3; 3] {
        self.faces[index].map(|i| self.vertices[i])
    }

    /// Minimum and maximum corners of the local-space bounding box.
    pub fn bounds(&self) -> (Vector3, Vector3) {
        let first = self.vertices[0];
        self.vertices.iter().fold((first, first), |(min, max), v| {
            (
                (min.0.min(v.0), min.1.min(v.1), min.2.min(v.2)),
                (max.0.max(v.0), max.1.max(v.1), max.2.max(v.2)),
            )
        })
    }

    /// Signed volume by the divergence theorem; positive for outward-facing triangles.
    pub fn signed_volume(&self) -> f64 {
        self.faces
            .iter()
            .map(|&[a, b, c]| {
                let (v0, v1, v2) = (self.vertices[a], self.vertices[b], self.vertices[c]);
                dot_product(v0, cross_product(v1, v2)) / 6.0
            })
            .sum()
    }

    /// Ray-parity inside test: casts a ray along +X and counts face crossings.
    pub fn contains_point(&self, point: Vector3) -> bool {
        let (min, max) = self.bounds();
        let diagonal = vector_magnitude(subtract_vectors(max, min));
        let origin = (
            point.0,
            point.1 + RAY_JITTER.0 * diagonal,
            point.2 + RAY_JITTER.1 * diagonal,
        );

        let crossings = self
            .faces
            .iter()
            .filter(|&&[a, b, c]| {
                ray_crosses_triangle(origin, self.vertices[a], self.vertices[b], self.vertices[c])
            })
            .count();

        crossings % 2 == 1
    }

    /// Cell-centered samples of a `resolution³` grid over the bounding box that
    /// lie inside the mesh.
    pub fn sample_interior(&self, resolution: usize) -> Vec<Vector3> {
        let (min, max) = self.bounds();
        let cell = (
            (max.0 - min.0) / resolution as f64,
            (max.1 - min.1) / resolution as f64,
            (max.2 - min.2) / resolution as f64,
        );
        let sample_at = |index: usize| {
            let i = index % resolution;
            let j = (index / resolution) % resolution;
            let k = index / (resolution * resolution);
            (
                min.0 + (i as f64 + 0.5) * cell.0,
                min.1 + (j as f64 + 0.5) * cell.1,
                min.2 + (k as f64 + 0.5) * cell.2,
            )
        };
        let total = resolution * resolution * resolution;

        #[cfg(feature = "parallel")]
        let samples = (0..total)
            .into_par_iter()
            .map(sample_at)
            .filter(|&p| self.contains_point(p))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let samples = (0..total)
            .map(sample_at)
            .filter(|&p| self.contains_point(p))
            .collect();

        samples
    }

    /// Moves every vertex by `offset`.
    pub(crate) fn translate(&mut self, offset: Vector3) {
        for vertex in &mut self.vertices {
            *vertex = add_vectors(*vertex, offset);
        }
    }
}

/// Whether the ray `origin + t·(1, 0, 0)`, `t > 0`, passes through triangle `abc`.
fn ray_crosses_triangle(origin: Vector3, a: Vector3, b: Vector3, c: Vector3) -> bool {
    // Barycentric coordinates of the origin projected onto the YZ plane
    let (ay, az) = (a.1 - origin.1, a.2 - origin.2);
    let (by, bz) = (b.1 - origin.1, b.2 - origin.2);
    let (cy, cz) = (c.1 - origin.1, c.2 - origin.2);

    let area = (by - ay) * (cz - az) - (bz - az) * (cy - ay);
    if area.abs() < f64::EPSILON * 1e-3 {
        // Face is parallel to the ray
        return false;
    }

    let wa = (by * cz - bz * cy) / area;
    let wb = (cy * az - cz * ay) / area;
    let wc = 1.0 - wa - wb;
    if wa < 0.0 || wb < 0.0 || wc < 0.0 {
        return false;
    }

    let hit_x = wa * vector_component(a, 0) + wb * vector_component(b, 0) + wc * vector_component(c, 0);
    hit_x > origin.0
}
