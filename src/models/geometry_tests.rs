// src/models/geometry_tests.rs

use std::f64::consts::PI;
use crate::assert_float_eq;
use crate::models::Geometry;
use crate::utils::PhysicsError;

#[test]
fn test_cuboid_topology() {
    let cuboid = Geometry::cuboid(2.0, 1.0, 3.0).unwrap();

    assert_eq!(cuboid.vertices().len(), 8);
    assert_eq!(cuboid.faces().len(), 12);
    assert_eq!(cuboid.edges().len(), 18);
    assert_float_eq(cuboid.signed_volume(), 6.0, 1e-12, Some("cuboid volume"));

    let (min, max) = cuboid.bounds();
    assert_eq!(min, (-1.0, -0.5, -1.5));
    assert_eq!(max, (1.0, 0.5, 1.5));
}

#[test]
fn test_edges_are_sorted_and_unique() {
    let cube = Geometry::cube(1.0).unwrap();
    let edges = cube.edges();

    for &(i, j) in edges {
        assert!(i < j, "edge ({}, {}) not normalized", i, j);
    }
    for pair in edges.windows(2) {
        assert!(pair[0] < pair[1], "edges not strictly increasing");
    }
}

#[test]
fn test_uv_sphere_is_closed_and_outward() {
    let (stacks, slices) = (8, 16);
    let sphere = Geometry::uv_sphere(1.0, stacks, slices).unwrap();

    let v = sphere.vertices().len();
    let f = sphere.faces().len();
    let e = sphere.edges().len();
    assert_eq!(v, 2 + (stacks - 1) * slices);
    assert_eq!(f, 2 * slices * (stacks - 1));
    // Euler characteristic of a closed genus-0 surface
    assert_eq!(v as i64 - e as i64 + f as i64, 2);

    let volume = sphere.signed_volume();
    assert!(volume > 0.0, "faces should wind outward");
    assert!(volume < 4.0 / 3.0 * PI, "inscribed mesh must be smaller than the sphere");
    assert!(volume > 0.85 * 4.0 / 3.0 * PI, "volume {} too small", volume);
}

#[test]
fn test_invalid_geometry_is_rejected() {
    assert_eq!(Geometry::new(vec![], vec![]), Err(PhysicsError::EmptyGeometry));

    let triangle = vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)];
    assert_eq!(
        Geometry::new(triangle.clone(), vec![[0, 1, 3]]),
        Err(PhysicsError::InvalidFaceIndex { face: 0, index: 3, vertex_count: 3 })
    );

    let collinear = vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0)];
    assert_eq!(Geometry::new(collinear, vec![[0, 1, 2]]), Err(PhysicsError::DegenerateFace(0)));

    assert!(Geometry::cuboid(1.0, 0.0, 1.0).is_err());
    assert!(Geometry::uv_sphere(1.0, 1, 8).is_err());
}

#[test]
fn test_contains_point() {
    let cube = Geometry::cube(2.0).unwrap();

    assert!(cube.contains_point((0.0, 0.0, 0.0)));
    assert!(cube.contains_point((0.95, -0.95, 0.95)));
    // Exactly on a shared diagonal of the YZ projection
    assert!(cube.contains_point((0.5, 0.5, 0.5)));
    assert!(!cube.contains_point((1.5, 0.0, 0.0)));
    assert!(!cube.contains_point((-1.5, 0.0, 0.0)));
    assert!(!cube.contains_point((0.0, 2.0, 0.0)));
}

#[test]
fn test_sample_interior_of_cube_fills_grid() {
    let cube = Geometry::cube(1.0).unwrap();
    let samples = cube.sample_interior(10);

    assert_eq!(samples.len(), 1000);
    for &(x, y, z) in &samples {
        assert!(x.abs() < 0.5 && y.abs() < 0.5 && z.abs() < 0.5);
    }
}

#[test]
fn test_sample_interior_of_sphere_tracks_volume() {
    let sphere = Geometry::uv_sphere(1.0, 8, 16).unwrap();
    let resolution = 10;
    let samples = sphere.sample_interior(resolution);

    // Fraction of the bounding box the sphere occupies is about π/6
    let fraction = samples.len() as f64 / (resolution * resolution * resolution) as f64;
    assert!(fraction > 0.4 && fraction < 0.6, "interior fraction {}", fraction);
    for &point in &samples {
        assert!(sphere.contains_point(point));
    }
}
