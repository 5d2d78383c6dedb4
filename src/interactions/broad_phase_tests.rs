// src/interactions/broad_phase_tests.rs

use crate::assert_float_eq;
use crate::interactions::{collect_candidate_pairs, Aabb};
use crate::models::{BodyInit, Geometry, RigidBody};
use crate::utils::SimulationConfig;

fn cube_at(x: f64, y: f64, velocity_x: f64) -> RigidBody {
    let init = BodyInit { velocity: (velocity_x, 0.0, 0.0), ..BodyInit::at((x, y, 0.0)) };
    RigidBody::from_geometry(Geometry::cube(1.0).unwrap(), 1.0, init).unwrap()
}

#[test]
fn test_aabb_overlap() {
    let a = Aabb { min: (0.0, 0.0, 0.0), max: (1.0, 1.0, 1.0) };
    let touching = Aabb { min: (1.0, 0.5, 0.5), max: (2.0, 2.0, 2.0) };
    let apart = Aabb { min: (1.1, 0.0, 0.0), max: (2.0, 1.0, 1.0) };

    assert!(a.overlaps(&touching));
    assert!(touching.overlaps(&a));
    assert!(!a.overlaps(&apart));
    assert_eq!(
        a.union(&apart),
        Aabb { min: (0.0, 0.0, 0.0), max: (2.0, 1.0, 1.0) }
    );
    assert!(a.reaches_ground());
    assert!(!apart.including((1.5, 3.0, 0.5)).overlaps(&Aabb { min: (5.0, 5.0, 5.0), max: (6.0, 6.0, 6.0) }));
}

#[test]
fn test_from_points() {
    assert_eq!(Aabb::from_points(Vec::new()), None);

    let bounds = Aabb::from_points(vec![(1.0, -2.0, 0.0), (-1.0, 3.0, 0.5), (0.0, 0.0, -4.0)]).unwrap();
    assert_eq!(bounds.min, (-1.0, -2.0, -4.0));
    assert_eq!(bounds.max, (1.0, 3.0, 0.5));
}

#[test]
fn test_swept_bounds_cover_both_snapshots() {
    let mut body = cube_at(0.0, 5.0, 10.0);
    body.snapshot();
    body.integrate(0.5, &SimulationConfig::free_space());

    let swept = body.swept_bounds();
    assert_float_eq(swept.min.0, -0.5, 1e-12, Some("trailing edge"));
    assert_float_eq(swept.max.0, 5.5, 1e-12, Some("leading edge"));
    assert_float_eq(swept.min.1, 4.5, 1e-12, Some("bottom"));
    assert!(!swept.reaches_ground());
}

#[test]
fn test_candidate_pairs_reuse_buffers() {
    let bodies = vec![cube_at(0.0, 2.0, 0.0), cube_at(0.9, 2.0, 0.0), cube_at(10.0, 2.0, 0.0)];
    let mut bounds = Vec::new();
    let mut pairs = vec![(7, 8)];

    collect_candidate_pairs(&bodies, &mut bounds, &mut pairs);

    assert_eq!(bounds.len(), 3);
    assert_eq!(pairs, vec![(0, 1)]);

    collect_candidate_pairs(&bodies[1..], &mut bounds, &mut pairs);
    assert_eq!(bounds.len(), 2);
    assert!(pairs.is_empty());
}
