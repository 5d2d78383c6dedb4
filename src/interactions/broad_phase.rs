use crate::models::RigidBody;
use crate::utils::Vector3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Aabb>
    where
        I: IntoIterator<Item = Vector3>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Aabb { min: first, max: first }, |bounds, p| bounds.including(p)))
    }

    /// This box grown to contain `point`.
    pub fn including(&self, point: Vector3) -> Aabb {
        Aabb {
            min: (self.min.0.min(point.0), self.min.1.min(point.1), self.min.2.min(point.2)),
            max: (self.max.0.max(point.0), self.max.1.max(point.1), self.max.2.max(point.2)),
        }
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        self.including(other.min).including(other.max)
    }

    /// Closed-interval overlap on all three axes; touching boxes overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.0 <= other.max.0
            && other.min.0 <= self.max.0
            && self.min.1 <= other.max.1
            && other.min.1 <= self.max.1
            && self.min.2 <= other.max.2
            && other.min.2 <= self.max.2
    }

    /// Whether the box reaches down to the `y = 0` ground plane.
    pub fn reaches_ground(&self) -> bool {
        self.min.1 <= 0.0
    }
}

impl RigidBody {
    /// Box around the body at both ends of the current sub-step.
    ///
    /// Covering the previous vertex positions as well as the current ones means
    /// a fast body cannot skip past a neighbor between two snapshots.
    pub fn swept_bounds(&self) -> Aabb {
        let points = self
            .previous_world_vertices()
            .iter()
            .chain(self.world_vertices())
            .copied();
        // A body always has at least one vertex
        Aabb::from_points(points).unwrap_or(Aabb { min: self.position(), max: self.position() })
    }
}

/// Refreshes `bounds` with the swept box of every body and fills `pairs` with
/// the index pairs `(i, j)`, `i < j`, whose boxes overlap.
///
/// Both buffers are cleared first and reused across calls.
pub fn collect_candidate_pairs(
    bodies: &[RigidBody],
    bounds: &mut Vec<Aabb>,
    pairs: &mut Vec<(usize, usize)>,
) {
    bounds.clear();
    bounds.extend(bodies.iter().map(RigidBody::swept_bounds));

    pairs.clear();
    for i in 0..bounds.len() {
        for j in (i + 1)..bounds.len() {
            if bounds[i].overlaps(&bounds[j]) {
                pairs.push((i, j));
            }
        }
    }
}
