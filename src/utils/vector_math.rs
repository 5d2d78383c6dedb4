use crate::utils::PhysicsError;

/// A 3D vector as `(x, y, z)`.
pub type Vector3 = (f64, f64, f64);

/// A row-major 3x3 matrix: `m[row][column]`.
pub type Matrix3 = [[f64; 3]; 3];

/// Determinants below this magnitude are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

pub const ZERO_VECTOR: Vector3 = (0.0, 0.0, 0.0);

pub const IDENTITY_MATRIX: Matrix3 = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

pub const ZERO_MATRIX: Matrix3 = [[0.0; 3]; 3];

#[inline]
pub fn add_vectors(a: Vector3, b: Vector3) -> Vector3 {
    (a.0 + b.0, a.1 + b.1, a.2 + b.2)
}

#[inline]
pub fn subtract_vectors(a: Vector3, b: Vector3) -> Vector3 {
    (a.0 - b.0, a.1 - b.1, a.2 - b.2)
}

#[inline]
pub fn scale_vector(v: Vector3, scalar: f64) -> Vector3 {
    (v.0 * scalar, v.1 * scalar, v.2 * scalar)
}

/// Divides each component of `v` by `divisor`.
///
/// # Errors
/// Returns `PhysicsError::DivisionByZero` when `divisor` is zero.
pub fn divide_vector(v: Vector3, divisor: f64) -> Result<Vector3, PhysicsError> {
    if divisor == 0.0 {
        return Err(PhysicsError::DivisionByZero);
    }
    Ok((v.0 / divisor, v.1 / divisor, v.2 / divisor))
}

/// Linear interpolation between `a` (at `t = 0`) and `b` (at `t = 1`).
#[inline]
pub fn lerp_vectors(a: Vector3, b: Vector3, t: f64) -> Vector3 {
    add_vectors(a, scale_vector(subtract_vectors(b, a), t))
}

/// Calculates the dot product of two 3D vectors.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::dot_product;
///
/// assert_eq!(dot_product((1.0, 2.0, 3.0), (4.0, 5.0, 6.0)), 32.0);
/// ```
#[inline]
pub fn dot_product(a: Vector3, b: Vector3) -> f64 {
    a.0 * b.0 + a.1 * b.1 + a.2 * b.2
}

/// Calculates the cross product of two 3D vectors.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::cross_product;
///
/// let z = cross_product((1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
/// assert_eq!(z, (0.0, 0.0, 1.0));
/// ```
#[inline]
pub fn cross_product(v1: Vector3, v2: Vector3) -> Vector3 {
    (
        v1.1 * v2.2 - v1.2 * v2.1,
        v1.2 * v2.0 - v1.0 * v2.2,
        v1.0 * v2.1 - v1.1 * v2.0
    )
}

#[inline]
pub fn vector_magnitude(v: Vector3) -> f64 {
    dot_product(v, v).sqrt()
}

/// Normalizes a 3D vector (makes it a unit vector).
///
/// # Errors
/// Returns `PhysicsError::ZeroVector` if the vector has (near) zero length.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::normalize_vector;
///
/// let unit = normalize_vector((3.0, 0.0, 4.0)).unwrap();
/// assert!((unit.0 - 0.6).abs() < 1e-12);
/// assert!((unit.2 - 0.8).abs() < 1e-12);
/// assert!(normalize_vector((0.0, 0.0, 0.0)).is_err());
/// ```
pub fn normalize_vector(v: Vector3) -> Result<Vector3, PhysicsError> {
    let magnitude = vector_magnitude(v);
    if magnitude < 1e-12 {
        return Err(PhysicsError::ZeroVector);
    }
    Ok((v.0 / magnitude, v.1 / magnitude, v.2 / magnitude))
}

#[inline]
pub fn vector_component(v: Vector3, axis: usize) -> f64 {
    match axis {
        0 => v.0,
        1 => v.1,
        _ => v.2,
    }
}

#[inline]
pub fn matrix_vector_multiply(m: &Matrix3, v: Vector3) -> Vector3 {
    (
        m[0][0] * v.0 + m[0][1] * v.1 + m[0][2] * v.2,
        m[1][0] * v.0 + m[1][1] * v.1 + m[1][2] * v.2,
        m[2][0] * v.0 + m[2][1] * v.1 + m[2][2] * v.2,
    )
}

pub fn matrix_multiply(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut result = ZERO_MATRIX;
    for (row, result_row) in result.iter_mut().enumerate() {
        for (col, cell) in result_row.iter_mut().enumerate() {
            *cell = a[row][0] * b[0][col] + a[row][1] * b[1][col] + a[row][2] * b[2][col];
        }
    }
    result
}

pub fn transpose(m: &Matrix3) -> Matrix3 {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

pub fn add_matrices(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut result = *a;
    for (row, result_row) in result.iter_mut().enumerate() {
        for (col, cell) in result_row.iter_mut().enumerate() {
            *cell += b[row][col];
        }
    }
    result
}

pub fn scale_matrix(m: &Matrix3, scalar: f64) -> Matrix3 {
    let mut result = *m;
    result.iter_mut().flatten().for_each(|cell| *cell *= scalar);
    result
}

pub fn determinant(m: &Matrix3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Inverts a 3x3 matrix using the adjugate.
///
/// # Errors
/// Returns `PhysicsError::SingularInertiaTensor` when the determinant is
/// (near) zero relative to the matrix scale.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::{invert_matrix, matrix_multiply, IDENTITY_MATRIX};
///
/// let m = [[2.0, 0.0, 0.0], [0.0, 4.0, 1.0], [0.0, 1.0, 4.0]];
/// let inverse = invert_matrix(&m).unwrap();
/// let product = matrix_multiply(&m, &inverse);
/// for row in 0..3 {
///     for col in 0..3 {
///         assert!((product[row][col] - IDENTITY_MATRIX[row][col]).abs() < 1e-12);
///     }
/// }
/// ```
pub fn invert_matrix(m: &Matrix3) -> Result<Matrix3, PhysicsError> {
    let det = determinant(m);
    let scale = m.iter().flatten().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if !det.is_finite() || scale == 0.0 || det.abs() <= SINGULAR_EPSILON * scale.powi(3) {
        return Err(PhysicsError::SingularInertiaTensor);
    }

    let inv_det = 1.0 / det;
    Ok([
        [
            (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
        ],
        [
            (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
        ],
        [
            (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
        ],
    ])
}

/// The cross-product matrix of `v`: `skew(v) · u == v × u`.
pub fn skew_symmetric(v: Vector3) -> Matrix3 {
    [
        [0.0, -v.2, v.1],
        [v.2, 0.0, -v.0],
        [-v.1, v.0, 0.0],
    ]
}

/// Outer product `a ⊗ b`.
pub fn outer_product(a: Vector3, b: Vector3) -> Matrix3 {
    [
        [a.0 * b.0, a.0 * b.1, a.0 * b.2],
        [a.1 * b.0, a.1 * b.1, a.1 * b.2],
        [a.2 * b.0, a.2 * b.1, a.2 * b.2],
    ]
}

/// Similarity transform `r · m · rᵗ`, used to move tensors between body and world space.
pub fn rotate_tensor(rotation: &Matrix3, tensor: &Matrix3) -> Matrix3 {
    matrix_multiply(&matrix_multiply(rotation, tensor), &transpose(rotation))
}

pub fn matrix_column(m: &Matrix3, col: usize) -> Vector3 {
    (m[0][col], m[1][col], m[2][col])
}

/// Re-orthonormalizes the columns of a rotation matrix with Gram-Schmidt.
///
/// The first column keeps its direction, the second is made perpendicular to
/// it and the third is rebuilt as their cross product, so the result is always
/// right-handed. Falls back to the input when a column collapses.
pub fn orthonormalize(m: &Matrix3) -> Matrix3 {
    let x = match normalize_vector(matrix_column(m, 0)) {
        Ok(x) => x,
        Err(_) => return *m,
    };
    let raw_y = matrix_column(m, 1);
    let y = match normalize_vector(subtract_vectors(raw_y, scale_vector(x, dot_product(x, raw_y)))) {
        Ok(y) => y,
        Err(_) => return *m,
    };
    let z = cross_product(x, y);

    [
        [x.0, y.0, z.0],
        [x.1, y.1, z.1],
        [x.2, y.2, z.2],
    ]
}

/// Largest absolute entry of `mᵗm − I`; zero for a perfectly orthonormal matrix.
pub fn orthonormality_error(m: &Matrix3) -> f64 {
    let gram = matrix_multiply(&transpose(m), m);
    let mut error = 0.0_f64;
    for (row, gram_row) in gram.iter().enumerate() {
        for (col, value) in gram_row.iter().enumerate() {
            error = error.max((value - IDENTITY_MATRIX[row][col]).abs());
        }
    }
    error
}

/// Rotation of `angle` radians about `axis` (Rodrigues' formula).
///
/// # Errors
/// Returns `PhysicsError::ZeroVector` for a zero axis.
pub fn rotation_from_axis_angle(axis: Vector3, angle: f64) -> Result<Matrix3, PhysicsError> {
    let (x, y, z) = normalize_vector(axis)?;
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;

    Ok([
        [t * x * x + c, t * x * y - s * z, t * x * z + s * y],
        [t * x * y + s * z, t * y * y + c, t * y * z - s * x],
        [t * x * z - s * y, t * y * z + s * x, t * z * z + c],
    ])
}
