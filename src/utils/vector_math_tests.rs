// src/utils/vector_math_tests.rs

use std::f64::consts::PI;
use approx::assert_relative_eq;
use crate::assert_float_eq;
use crate::utils::*;

fn assert_matrix_eq(a: &Matrix3, b: &Matrix3, epsilon: f64) {
    for row in 0..3 {
        for col in 0..3 {
            assert_float_eq(a[row][col], b[row][col], epsilon, Some(&format!("entry [{}][{}]", row, col)));
        }
    }
}

#[test]
fn test_basic_vector_arithmetic() {
    let a = (1.0, -2.0, 3.0);
    let b = (0.5, 4.0, -1.0);

    assert_eq!(add_vectors(a, b), (1.5, 2.0, 2.0));
    assert_eq!(subtract_vectors(a, b), (0.5, -6.0, 4.0));
    assert_eq!(scale_vector(a, 2.0), (2.0, -4.0, 6.0));
    assert_eq!(divide_vector(a, 2.0).unwrap(), (0.5, -1.0, 1.5));
    assert_eq!(divide_vector(a, 0.0), Err(PhysicsError::DivisionByZero));
    assert_eq!(lerp_vectors(a, b, 0.5), (0.75, 1.0, 1.0));
}

#[test]
fn test_cross_product_is_perpendicular() {
    let a = (1.0, 2.0, 3.0);
    let b = (-4.0, 0.5, 2.0);
    let c = cross_product(a, b);

    assert_float_eq(dot_product(a, c), 0.0, 1e-12, None);
    assert_float_eq(dot_product(b, c), 0.0, 1e-12, None);
    assert_eq!(cross_product(b, a), scale_vector(c, -1.0));
}

#[test]
fn test_skew_matches_cross_product() {
    let v = (0.3, -1.2, 2.5);
    let u = (4.0, 1.0, -0.5);
    let via_matrix = matrix_vector_multiply(&skew_symmetric(v), u);
    let direct = cross_product(v, u);

    assert_relative_eq!(via_matrix.0, direct.0, epsilon = 1e-12);
    assert_relative_eq!(via_matrix.1, direct.1, epsilon = 1e-12);
    assert_relative_eq!(via_matrix.2, direct.2, epsilon = 1e-12);
}

#[test]
fn test_invert_matrix() {
    let m = [[4.0, 1.0, 0.5], [1.0, 3.0, -0.2], [0.5, -0.2, 2.0]];
    let inverse = invert_matrix(&m).unwrap();

    assert_matrix_eq(&matrix_multiply(&m, &inverse), &IDENTITY_MATRIX, 1e-12);
    assert_matrix_eq(&matrix_multiply(&inverse, &m), &IDENTITY_MATRIX, 1e-12);
}

#[test]
fn test_invert_singular_matrix_fails() {
    let rank_two = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]];
    assert_eq!(invert_matrix(&rank_two), Err(PhysicsError::SingularInertiaTensor));
    assert_eq!(invert_matrix(&ZERO_MATRIX), Err(PhysicsError::SingularInertiaTensor));
}

#[test]
fn test_transpose_of_rotation_is_inverse() {
    let rotation = rotation_from_axis_angle((1.0, 1.0, 0.0), PI / 3.0).unwrap();
    let product = matrix_multiply(&rotation, &transpose(&rotation));

    assert_matrix_eq(&product, &IDENTITY_MATRIX, 1e-12);
    assert_float_eq(determinant(&rotation), 1.0, 1e-12, None);
}

#[test]
fn test_rotation_about_z() {
    let rotation = rotation_from_axis_angle((0.0, 0.0, 1.0), PI / 2.0).unwrap();
    let rotated = matrix_vector_multiply(&rotation, (1.0, 0.0, 0.0));

    assert_float_eq(rotated.0, 0.0, 1e-12, None);
    assert_float_eq(rotated.1, 1.0, 1e-12, None);
    assert_float_eq(rotated.2, 0.0, 1e-12, None);
    assert!(rotation_from_axis_angle((0.0, 0.0, 0.0), 1.0).is_err());
}

#[test]
fn test_orthonormalize_repairs_drift() {
    let rotation = rotation_from_axis_angle((0.2, 1.0, -0.4), 0.7).unwrap();
    let drifted = add_matrices(&rotation, &scale_matrix(&[[0.3, -0.1, 0.2], [0.05, 0.1, -0.3], [0.2, 0.4, 0.1]], 1e-3));

    assert!(orthonormality_error(&drifted) > 1e-5);
    let repaired = orthonormalize(&drifted);
    assert!(orthonormality_error(&repaired) < 1e-12);
    assert_float_eq(determinant(&repaired), 1.0, 1e-12, None);
    // The repair is a small correction, not a different rotation
    assert_matrix_eq(&repaired, &rotation, 1e-2);
}

#[test]
fn test_orthonormalize_keeps_identity() {
    assert_eq!(orthonormalize(&IDENTITY_MATRIX), IDENTITY_MATRIX);
}

#[test]
fn test_rotate_tensor_preserves_trace() {
    let tensor = [[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 5.0]];
    let rotation = rotation_from_axis_angle((1.0, 2.0, 3.0), 1.1).unwrap();
    let rotated = rotate_tensor(&rotation, &tensor);

    assert_float_eq(rotated[0][0] + rotated[1][1] + rotated[2][2], 10.0, 1e-12, None);
    assert_float_eq(rotated[0][1], rotated[1][0], 1e-12, Some("rotated tensor stays symmetric"));
}

#[test]
fn test_outer_product() {
    let m = outer_product((1.0, 2.0, 3.0), (4.0, 5.0, 6.0));
    assert_eq!(m[0], [4.0, 5.0, 6.0]);
    assert_eq!(m[2], [12.0, 15.0, 18.0]);
    assert_eq!(matrix_column(&m, 1), (5.0, 10.0, 15.0));
}
