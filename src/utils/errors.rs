use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building bodies or configuring a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Indicates an invalid mass value (e.g., negative, zero or non-finite mass).
    InvalidMass,
    /// Indicates a restitution coefficient outside `[0, 1]`.
    InvalidCoefficient,
    /// Indicates a non-positive or non-finite time step.
    InvalidTime,
    /// Indicates an iteration cap of zero.
    InvalidIterationCap,
    /// Indicates a sampling resolution too coarse to classify interior points.
    InvalidResolution,
    /// The geometry has no vertices or no faces.
    EmptyGeometry,
    /// A face references a vertex that was never declared.
    InvalidFaceIndex { face: usize, index: usize, vertex_count: usize },
    /// A face whose corners are collinear or coincident.
    DegenerateFace(usize),
    /// No sample point of the bounding-box grid fell inside the mesh.
    NoInteriorSamples,
    /// The sampled inertia tensor cannot be inverted.
    SingularInertiaTensor,
    /// Indicates a division by zero error.
    DivisionByZero,
    /// A zero-length vector was used where a direction was required.
    ZeroVector,
    /// Mesh text could not be parsed.
    ParseError { line: usize, message: String },
    /// A general error for calculations that produce invalid results.
    CalculationError(String),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "Invalid mass value"),
            PhysicsError::InvalidCoefficient => write!(f, "Invalid coefficient value"),
            PhysicsError::InvalidTime => write!(f, "Invalid time value"),
            PhysicsError::InvalidIterationCap => write!(f, "Iteration cap must be at least 1"),
            PhysicsError::InvalidResolution => write!(f, "Sampling resolution must be at least 2"),
            PhysicsError::EmptyGeometry => write!(f, "Geometry has no vertices or no faces"),
            PhysicsError::InvalidFaceIndex { face, index, vertex_count } => write!(
                f,
                "Face {} references vertex {} but only {} vertices are declared",
                face, index, vertex_count
            ),
            PhysicsError::DegenerateFace(face) => write!(f, "Face {} has zero area", face),
            PhysicsError::NoInteriorSamples => write!(f, "No interior sample points found"),
            PhysicsError::SingularInertiaTensor => write!(f, "Inertia tensor is singular"),
            PhysicsError::DivisionByZero => write!(f, "Division by zero"),
            PhysicsError::ZeroVector => write!(f, "Cannot normalize a zero vector"),
            PhysicsError::ParseError { line, message } => write!(f, "Parse error on line {}: {}", line, message),
            PhysicsError::CalculationError(msg) => write!(f, "Calculation error: {}", msg),
        }
    }
}


impl Error for PhysicsError {}
