use crate::models::{BodyContact, Collision, RigidBody};

/// Exact contact queries the resolver runs on broad-phase survivors.
///
/// Implementors see each body after it has been integrated over a sub-step of
/// `h` seconds, with the start of the sub-step still held in its previous
/// snapshot.
pub trait NarrowPhase {
    /// Earliest ground contact of body `index`, if any.
    fn ground_contact(&mut self, index: usize, body: &RigidBody, h: f64) -> Option<Collision>;

    /// Earliest contact between bodies `index_a` and `index_b`, if any.
    fn body_contact(
        &mut self,
        index_a: usize,
        a: &RigidBody,
        index_b: usize,
        b: &RigidBody,
        h: f64,
    ) -> Option<Collision>;
}

/// Continuous detection over vertex-face and edge-edge features.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContinuousDetection;

impl NarrowPhase for ContinuousDetection {
    fn ground_contact(&mut self, index: usize, body: &RigidBody, h: f64) -> Option<Collision> {
        body.check_ground_plane_collision(h)
            .map(|contact| Collision::Ground { body: index, contact })
    }

    fn body_contact(
        &mut self,
        index_a: usize,
        a: &RigidBody,
        index_b: usize,
        b: &RigidBody,
        h: f64,
    ) -> Option<Collision> {
        earliest_body_contact(a, b, h).map(|contact| Collision::Body {
            body_a: index_a,
            body_b: index_b,
            contact,
        })
    }
}

/// Earliest of the vertex-face queries in both directions and the edge-edge
/// query, expressed with `a` as body A.
///
/// An edge-edge contact replaces a vertex-face one only when it is strictly
/// earlier by more than a millionth of the step, since a vertex landing on a
/// face also puts its edges through the face's edges at the same moment.
pub fn earliest_body_contact(a: &RigidBody, b: &RigidBody, h: f64) -> Option<BodyContact> {
    let tie_tolerance = 1e-6 * h;

    let a_on_b = a.check_vertex_face_collision(h, b);
    let b_on_a = b.check_vertex_face_collision(h, a).map(|contact| contact.swapped());
    let vertex_face = match (a_on_b, b_on_a) {
        (Some(first), Some(second)) if second.time < first.time => Some(second),
        (Some(first), _) => Some(first),
        (None, second) => second,
    };

    let edge_edge = a.check_edge_edge_collision(h, b);

    match (vertex_face, edge_edge) {
        (Some(vf), Some(ee)) if ee.time < vf.time - tie_tolerance => Some(ee),
        (Some(vf), _) => Some(vf),
        (None, ee) => ee,
    }
}
