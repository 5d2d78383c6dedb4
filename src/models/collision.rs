use crate::models::RigidBody;
use crate::utils::{subtract_vectors, Vector3};

/// Which features of two bodies touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// A vertex of body A reached a face of body B.
    VertexFace,
    /// An edge of body A crossed an edge of body B.
    EdgeEdge,
}

/// A body reaching the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    /// Plane normal, pointing away from the ground.
    pub normal: Vector3,
    /// World-space contact point.
    pub point: Vector3,
    /// Contact point minus the body's center of mass.
    pub contact_arm: Vector3,
    /// Seconds into the sub-step at which contact occurs.
    pub time: f64,
}

impl GroundContact {
    /// The same contact with its arm measured from `body`'s current center of mass.
    pub fn rebased(&self, body: &RigidBody) -> GroundContact {
        GroundContact { contact_arm: subtract_vectors(self.point, body.position()), ..*self }
    }
}

/// Two bodies touching. The normal points from body B toward body A.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyContact {
    pub kind: ContactKind,
    pub normal: Vector3,
    pub point: Vector3,
    pub contact_arm_a: Vector3,
    pub contact_arm_b: Vector3,
    pub time: f64,
}

impl BodyContact {
    /// The same contact seen from the other body.
    pub fn swapped(&self) -> BodyContact {
        BodyContact {
            kind: self.kind,
            normal: (-self.normal.0, -self.normal.1, -self.normal.2),
            point: self.point,
            contact_arm_a: self.contact_arm_b,
            contact_arm_b: self.contact_arm_a,
            time: self.time,
        }
    }

    /// The same contact with both arms measured from the bodies' current centers of mass.
    pub fn rebased(&self, a: &RigidBody, b: &RigidBody) -> BodyContact {
        BodyContact {
            contact_arm_a: subtract_vectors(self.point, a.position()),
            contact_arm_b: subtract_vectors(self.point, b.position()),
            ..*self
        }
    }
}

/// A detected contact tagged with the indices of the bodies involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collision {
    Ground { body: usize, contact: GroundContact },
    Body { body_a: usize, body_b: usize, contact: BodyContact },
}

impl Collision {
    pub fn time(&self) -> f64 {
        match self {
            Collision::Ground { contact, .. } => contact.time,
            Collision::Body { contact, .. } => contact.time,
        }
    }

    /// Recomputes the contact arms from the bodies' current states.
    ///
    /// Detection measures arms against centers of mass interpolated along a
    /// straight line; once the bodies have been re-integrated to the contact
    /// instant their actual centers are used instead. Out-of-range indices
    /// leave the collision unchanged.
    pub fn rebased(&self, bodies: &[RigidBody]) -> Collision {
        match *self {
            Collision::Ground { body, contact } => match bodies.get(body) {
                Some(b) => Collision::Ground { body, contact: contact.rebased(b) },
                None => *self,
            },
            Collision::Body { body_a, body_b, contact } => match (bodies.get(body_a), bodies.get(body_b)) {
                (Some(a), Some(b)) => Collision::Body { body_a, body_b, contact: contact.rebased(a, b) },
                _ => *self,
            },
        }
    }
}
