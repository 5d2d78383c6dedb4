use crate::models::{BodyContact, ContactKind, GroundContact, RigidBody};
use crate::utils::{
    add_vectors, cross_product, dot_product, lerp_vectors, normalize_vector, scale_vector,
    subtract_vectors, Vector3, ZERO_VECTOR,
};

//==============================================================================
// CONSTANTS
//==============================================================================

/// Normal of the `y = 0` ground plane.
pub const GROUND_NORMAL: Vector3 = (0.0, 1.0, 0.0);

/// Events closer than this fraction of the step are treated as simultaneous.
const SIMULTANEOUS_FRACTION: f64 = 1e-6;

/// Width (in meters) of the band around a surface treated as touching. A
/// feature may start up to this far behind a surface and still register a
/// contact, and must end more than this far behind it to register one.
/// Absorbs the rounding left after re-integrating exactly to a contact
/// instant, and keeps bodies moving in lockstep from reporting contacts.
const CONTACT_SLOP: f64 = 1e-9;

/// Barycentric slack so contacts on shared edges and corners are not lost.
const BARYCENTRIC_TOLERANCE: f64 = 1e-9;

/// Edge-edge contacts closer than this to a segment end are left to the
/// vertex-face query.
const EDGE_PARAMETER_MARGIN: f64 = 1e-9;

/// Relative threshold below which two edge directions count as parallel.
const PARALLEL_EPSILON: f64 = 1e-12;

//==============================================================================
// HELPER FUNCTIONS
//==============================================================================

/// Running merge of contact events that happen at (nearly) the same time.
#[derive(Debug, Clone, Copy)]
struct ContactAccumulator {
    tolerance: f64,
    time: f64,
    point_sum: Vector3,
    normal_sum: Vector3,
    count: usize,
}

impl ContactAccumulator {
    fn new(h: f64) -> Self {
        ContactAccumulator {
            tolerance: SIMULTANEOUS_FRACTION * h,
            time: f64::INFINITY,
            point_sum: ZERO_VECTOR,
            normal_sum: ZERO_VECTOR,
            count: 0,
        }
    }

    fn add(&mut self, time: f64, point: Vector3, normal: Vector3) {
        if self.count == 0 || time < self.time - self.tolerance {
            self.time = time;
            self.point_sum = point;
            self.normal_sum = normal;
            self.count = 1;
        } else if time <= self.time + self.tolerance {
            self.time = self.time.min(time);
            self.point_sum = add_vectors(self.point_sum, point);
            self.normal_sum = add_vectors(self.normal_sum, normal);
            self.count += 1;
        }
    }

    /// Earliest time, mean contact point and mean normal.
    fn finish(&self) -> Option<(f64, Vector3, Vector3)> {
        if self.count == 0 {
            return None;
        }
        let point = scale_vector(self.point_sum, 1.0 / self.count as f64);
        // Opposing normals cancel out; there is no usable direction then
        let normal = normalize_vector(self.normal_sum).ok()?;
        Some((self.time, point, normal))
    }
}

/// Unit normal of triangle `abc`, or `None` when it has no area.
fn triangle_normal(a: Vector3, b: Vector3, c: Vector3) -> Option<Vector3> {
    normalize_vector(cross_product(subtract_vectors(b, a), subtract_vectors(c, a))).ok()
}

/// Whether `point`, projected onto the plane of `abc`, lies inside the triangle.
fn point_in_triangle(point: Vector3, a: Vector3, b: Vector3, c: Vector3) -> bool {
    let v0 = subtract_vectors(b, a);
    let v1 = subtract_vectors(c, a);
    let v2 = subtract_vectors(point, a);

    let d00 = dot_product(v0, v0);
    let d01 = dot_product(v0, v1);
    let d11 = dot_product(v1, v1);
    let d20 = dot_product(v2, v0);
    let d21 = dot_product(v2, v1);

    let denominator = d00 * d11 - d01 * d01;
    if denominator.abs() < f64::EPSILON * d00 * d11 {
        return false;
    }

    let v = (d11 * d20 - d01 * d21) / denominator;
    let w = (d00 * d21 - d01 * d20) / denominator;
    let u = 1.0 - v - w;

    u >= -BARYCENTRIC_TOLERANCE && v >= -BARYCENTRIC_TOLERANCE && w >= -BARYCENTRIC_TOLERANCE
}

/// Parameters `(s, t)` of the closest points `p + s·(q − p)` and `r + t·(u − r)`
/// on two infinite lines, or `None` when the lines are parallel.
fn closest_line_parameters(p: Vector3, q: Vector3, r: Vector3, u: Vector3) -> Option<(f64, f64)> {
    let d1 = subtract_vectors(q, p);
    let d2 = subtract_vectors(u, r);
    let w = subtract_vectors(p, r);

    let a = dot_product(d1, d1);
    let b = dot_product(d1, d2);
    let c = dot_product(d2, d2);
    let d = dot_product(d1, w);
    let e = dot_product(d2, w);

    let denominator = a * c - b * b;
    if denominator <= PARALLEL_EPSILON * a * c {
        return None;
    }

    Some(((b * e - c * d) / denominator, (a * e - b * d) / denominator))
}

/// Unit common normal of two edge directions, or `None` for parallel edges.
fn edge_pair_normal(p: Vector3, q: Vector3, r: Vector3, u: Vector3) -> Option<Vector3> {
    let d1 = subtract_vectors(q, p);
    let d2 = subtract_vectors(u, r);
    let normal = cross_product(d1, d2);
    let scale = dot_product(d1, d1) * dot_product(d2, d2);
    if dot_product(normal, normal) <= PARALLEL_EPSILON * scale {
        return None;
    }
    normalize_vector(normal).ok()
}

#[inline]
fn inside_segment(parameter: f64) -> bool {
    parameter > EDGE_PARAMETER_MARGIN && parameter < 1.0 - EDGE_PARAMETER_MARGIN
}

//==============================================================================
// NARROW-PHASE QUERIES
//==============================================================================

impl RigidBody {
    /// Center of mass interpolated between the previous and current snapshots.
    pub fn center_of_mass_at(&self, fraction: f64) -> Vector3 {
        lerp_vectors(self.previous_state().position, self.position(), fraction)
    }

    /// Earliest crossing of the `y = 0` plane by any vertex during the step `h`.
    ///
    /// The crossing time of a vertex is found by linear interpolation of its
    /// height between the two snapshots. Vertices crossing at the same moment
    /// (for example the four corners of a flat-landing box) are merged into a
    /// single contact at their centroid.
    pub fn check_ground_plane_collision(&self, h: f64) -> Option<GroundContact> {
        if h <= 0.0 {
            return None;
        }
        let mut accumulator = ContactAccumulator::new(h);

        for (&previous, &current) in self.previous_world_vertices().iter().zip(self.world_vertices()) {
            if previous.1 > -CONTACT_SLOP && current.1 < -CONTACT_SLOP {
                let fraction = (previous.1 / (previous.1 - current.1)).clamp(0.0, 1.0);
                accumulator.add(fraction * h, lerp_vectors(previous, current, fraction), GROUND_NORMAL);
            }
        }

        let (time, point, normal) = accumulator.finish()?;
        Some(GroundContact {
            normal,
            point,
            contact_arm: subtract_vectors(point, self.center_of_mass_at(time / h)),
            time,
        })
    }

    /// Earliest moment a vertex of `self` passes through a face of `other`.
    ///
    /// The returned contact names `self` as body A; its normal is the face
    /// normal of `other` and so points from `other` toward `self`.
    pub fn check_vertex_face_collision(&self, h: f64, other: &RigidBody) -> Option<BodyContact> {
        if h <= 0.0 {
            return None;
        }
        let mut accumulator = ContactAccumulator::new(h);

        let other_previous = other.previous_world_vertices();
        let other_current = other.world_vertices();

        for &[ia, ib, ic] in other.geometry().faces() {
            let (a0, b0, c0) = (other_previous[ia], other_previous[ib], other_previous[ic]);
            let (a1, b1, c1) = (other_current[ia], other_current[ib], other_current[ic]);
            let (n0, n1) = match (triangle_normal(a0, b0, c0), triangle_normal(a1, b1, c1)) {
                (Some(n0), Some(n1)) => (n0, n1),
                _ => continue,
            };

            for (&p0, &p1) in self.previous_world_vertices().iter().zip(self.world_vertices()) {
                let d0 = dot_product(subtract_vectors(p0, a0), n0);
                let d1 = dot_product(subtract_vectors(p1, a1), n1);
                if d0 <= -CONTACT_SLOP || d1 >= -CONTACT_SLOP {
                    continue;
                }

                let fraction = (d0 / (d0 - d1)).clamp(0.0, 1.0);
                let point = lerp_vectors(p0, p1, fraction);
                let a = lerp_vectors(a0, a1, fraction);
                let b = lerp_vectors(b0, b1, fraction);
                let c = lerp_vectors(c0, c1, fraction);
                if !point_in_triangle(point, a, b, c) {
                    continue;
                }

                if let Ok(normal) = normalize_vector(lerp_vectors(n0, n1, fraction)) {
                    accumulator.add(fraction * h, point, normal);
                }
            }
        }

        let (time, point, normal) = accumulator.finish()?;
        let fraction = time / h;
        Some(BodyContact {
            kind: ContactKind::VertexFace,
            normal,
            point,
            contact_arm_a: subtract_vectors(point, self.center_of_mass_at(fraction)),
            contact_arm_b: subtract_vectors(point, other.center_of_mass_at(fraction)),
            time,
        })
    }

    /// Earliest moment an edge of `self` passes through an edge of `other`.
    ///
    /// Uses the separation of the two edge lines along their common normal at
    /// both snapshots; a sign change means the lines crossed. Parallel pairs
    /// are skipped. The returned normal points from `other` toward `self`.
    pub fn check_edge_edge_collision(&self, h: f64, other: &RigidBody) -> Option<BodyContact> {
        if h <= 0.0 {
            return None;
        }
        let mut accumulator = ContactAccumulator::new(h);

        let (own_previous, own_current) = (self.previous_world_vertices(), self.world_vertices());
        let (other_previous, other_current) = (other.previous_world_vertices(), other.world_vertices());

        for &(i, j) in self.geometry().edges() {
            let (p0, q0, p1, q1) = (own_previous[i], own_previous[j], own_current[i], own_current[j]);

            for &(k, l) in other.geometry().edges() {
                let (r0, u0, r1, u1) = (other_previous[k], other_previous[l], other_current[k], other_current[l]);

                let n0 = match edge_pair_normal(p0, q0, r0, u0) {
                    Some(n) => n,
                    None => continue,
                };
                let mut n1 = match edge_pair_normal(p1, q1, r1, u1) {
                    Some(n) => n,
                    None => continue,
                };
                if dot_product(n0, n1) < 0.0 {
                    n1 = scale_vector(n1, -1.0);
                }

                let separation0 = dot_product(subtract_vectors(p0, r0), n0);
                let separation1 = dot_product(subtract_vectors(p1, r1), n1);
                if separation0 == 0.0 || separation0 * separation1 > 0.0 || separation1.abs() <= CONTACT_SLOP {
                    continue;
                }

                let fraction = (separation0 / (separation0 - separation1)).clamp(0.0, 1.0);
                let p = lerp_vectors(p0, p1, fraction);
                let q = lerp_vectors(q0, q1, fraction);
                let r = lerp_vectors(r0, r1, fraction);
                let u = lerp_vectors(u0, u1, fraction);

                let (s, t) = match closest_line_parameters(p, q, r, u) {
                    Some(parameters) => parameters,
                    None => continue,
                };
                if !inside_segment(s) || !inside_segment(t) {
                    continue;
                }

                let on_own = lerp_vectors(p, q, s);
                let on_other = lerp_vectors(r, u, t);
                let point = lerp_vectors(on_own, on_other, 0.5);

                // Orient the normal from other toward self, i.e. toward the side self started on
                let direction = lerp_vectors(n0, n1, fraction);
                let normal = match normalize_vector(direction) {
                    Ok(n) if separation0 > 0.0 => n,
                    Ok(n) => scale_vector(n, -1.0),
                    Err(_) => continue,
                };

                accumulator.add(fraction * h, point, normal);
            }
        }

        let (time, point, normal) = accumulator.finish()?;
        let fraction = time / h;
        Some(BodyContact {
            kind: ContactKind::EdgeEdge,
            normal,
            point,
            contact_arm_a: subtract_vectors(point, self.center_of_mass_at(fraction)),
            contact_arm_b: subtract_vectors(point, other.center_of_mass_at(fraction)),
            time,
        })
    }
}
