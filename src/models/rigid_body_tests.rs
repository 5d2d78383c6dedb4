// src/models/rigid_body_tests.rs

use approx::assert_relative_eq;
use crate::{assert_float_eq, assert_vector_eq};
use crate::models::*;
use crate::utils::*;

fn unit_cube_at(position: Vector3) -> RigidBody {
    RigidBody::from_geometry(Geometry::cube(1.0).unwrap(), 1.0, BodyInit::at(position)).unwrap()
}

#[test]
fn test_new_body_places_vertices_around_position() {
    let body = unit_cube_at((1.0, 2.0, 3.0));

    assert_eq!(body.position(), (1.0, 2.0, 3.0));
    assert_eq!(body.world_vertices().len(), 8);
    assert_eq!(body.world_vertices(), body.previous_world_vertices());
    assert_vector_eq(body.world_vertices()[0], (0.5, 1.5, 2.5), 1e-12, Some("first corner"));
    assert_vector_eq(body.world_vertices()[6], (1.5, 2.5, 3.5), 1e-12, Some("opposite corner"));
}

#[test]
fn test_initial_velocities_round_trip() {
    let rotation = rotation_from_axis_angle((1.0, 1.0, 0.0), 0.7).unwrap();
    let init = BodyInit {
        position: (0.0, 5.0, 0.0),
        orientation: rotation,
        velocity: (1.0, -2.0, 0.5),
        angular_velocity: (0.3, -0.4, 2.0),
        restitution: 0.8,
    };
    let body = RigidBody::from_geometry(Geometry::cuboid(2.0, 1.0, 0.5).unwrap(), 3.0, init).unwrap();

    assert_vector_eq(body.velocity(), init.velocity, 1e-12, Some("velocity"));
    assert_vector_eq(body.angular_velocity(), init.angular_velocity, 1e-9, Some("angular velocity"));
    assert_vector_eq(body.state().linear_momentum, (3.0, -6.0, 1.5), 1e-12, Some("momentum"));
    assert_eq!(body.restitution(), 0.8);
}

#[test]
fn test_invalid_body_parameters() {
    let geometry = Geometry::cube(1.0).unwrap();
    let init = BodyInit { restitution: 1.5, ..BodyInit::default() };

    assert_eq!(
        RigidBody::from_geometry(geometry.clone(), 1.0, init).map(|_| ()),
        Err(PhysicsError::InvalidCoefficient)
    );
    assert_eq!(
        RigidBody::from_geometry(geometry, -1.0, BodyInit::default()).map(|_| ()),
        Err(PhysicsError::InvalidMass)
    );
}

#[test]
fn test_body_at_rest_without_gravity_stays_put() {
    let mut body = unit_cube_at((0.0, 1.0, 0.0));
    let before = *body.state();
    let config = SimulationConfig::free_space();

    for _ in 0..100 {
        body.integrate(0.01, &config);
    }

    assert_eq!(*body.state(), before);
}

#[test]
fn test_euler_gravity_accumulates_momentum() {
    let mut body = RigidBody::from_geometry(Geometry::cube(1.0).unwrap(), 2.0, BodyInit::at((0.0, 100.0, 0.0))).unwrap();
    let config = SimulationConfig::new(Some(IntegrationMethod::Euler), None, None, Some(false), None);
    let h = 0.01;
    let steps = 50;

    for _ in 0..steps {
        body.integrate(h, &config);
    }

    let expected = steps as f64 * h * 2.0 * -STANDARD_GRAVITY;
    assert_float_eq(body.state().linear_momentum.1, expected, 1e-9, Some("vertical momentum"));
    assert_eq!(body.state().linear_momentum.0, 0.0);
    assert_eq!(body.state().linear_momentum.2, 0.0);
}

#[test]
fn test_midpoint_free_fall_is_exact() {
    let mut body = unit_cube_at((0.0, 50.0, 0.0));
    let config = SimulationConfig { ground_contact: false, ..SimulationConfig::default() };
    let h = 0.01;

    for _ in 0..100 {
        body.integrate(h, &config);
    }

    let t = 1.0;
    assert_float_eq(body.position().1, 50.0 - 0.5 * STANDARD_GRAVITY * t * t, 1e-9, Some("height"));
    assert_float_eq(body.velocity().1, -STANDARD_GRAVITY * t, 1e-9, Some("fall speed"));
}

#[test]
fn test_spinning_body_keeps_orthonormal_orientation() {
    let init = BodyInit { angular_velocity: (1.0, 3.0, -2.0), ..BodyInit::at((0.0, 0.0, 0.0)) };
    let mut body = RigidBody::from_geometry(Geometry::cuboid(3.0, 1.0, 0.5).unwrap(), 1.0, init).unwrap();
    let angular_momentum = body.state().angular_momentum;
    let config = SimulationConfig::free_space();

    for _ in 0..2000 {
        body.integrate(1.0 / 60.0, &config);
    }

    assert!(orthonormality_error(body.orientation()) < 1e-9);
    assert_eq!(body.state().angular_momentum, angular_momentum);
}

#[test]
fn test_snapshot_and_restore() {
    let mut body = RigidBody::from_geometry(
        Geometry::cube(1.0).unwrap(),
        1.0,
        BodyInit { velocity: (1.0, 0.0, 0.0), ..BodyInit::at((0.0, 3.0, 0.0)) },
    )
    .unwrap();
    let config = SimulationConfig::default();

    body.snapshot();
    let start_state = *body.state();
    let start_vertices = body.world_vertices().to_vec();

    body.integrate(0.1, &config);
    assert_ne!(*body.state(), start_state);
    assert_eq!(*body.previous_state(), start_state);
    assert_eq!(body.previous_world_vertices(), start_vertices.as_slice());

    body.restore_to_previous();
    assert_eq!(*body.state(), start_state);
    assert_eq!(body.world_vertices(), start_vertices.as_slice());
}

#[test]
fn test_apply_impulse_changes_both_momenta() {
    let mut body = unit_cube_at((0.0, 0.0, 0.0));
    let impulse = (0.0, 2.0, 0.0);
    let arm = (0.5, -0.5, 0.0);

    body.apply_impulse(impulse, arm);

    assert_eq!(body.state().linear_momentum, impulse);
    assert_vector_eq(body.state().angular_momentum, cross_product(arm, impulse), 1e-12, None);

    body.scale_angular_momentum(0.5);
    assert_vector_eq(body.state().angular_momentum, (0.0, 0.0, 0.5), 1e-12, None);
}

#[test]
fn test_kinetic_energy() {
    let body = RigidBody::from_geometry(
        Geometry::cube(1.0).unwrap(),
        4.0,
        BodyInit { velocity: (3.0, 0.0, 4.0), ..BodyInit::default() },
    )
    .unwrap();

    assert_relative_eq!(body.kinetic_energy(), 0.5 * 4.0 * 25.0, epsilon = 1e-12);
}

#[test]
fn test_write_world_triangles() {
    let body = unit_cube_at((0.0, 0.0, 0.0));
    let mut buffer = vec![42.0];
    body.write_world_triangles(&mut buffer);

    assert_eq!(buffer.len(), 1 + 12 * 9);
    let first = body.world_triangles().next().unwrap();
    assert_eq!(&buffer[1..4], &[first[0].0, first[0].1, first[0].2]);
}
