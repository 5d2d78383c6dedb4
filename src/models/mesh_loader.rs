use crate::models::{Face, Geometry};
use crate::utils::{PhysicsError, Vector3};

/// Parses the vertex and face records of a Wavefront OBJ document.
///
/// Only `v` and `f` lines are read; other records (normals, texture
/// coordinates, groups, materials) are skipped. Face indices are 1-based,
/// may be negative (relative to the last declared vertex) and may carry
/// `/vt/vn` suffixes. Polygons with more than three corners are split into a
/// triangle fan.
///
/// # Example
/// ```
/// use rs_rigid_body::models::parse_obj;
///
/// let source = "
/// v 0 0 0
/// v 1 0 0
/// v 0 1 0
/// v 0 0 1
/// f 1 3 2
/// f 1 2 4
/// f 1 4 3
/// f 2 3 4
/// ";
/// let geometry = parse_obj(source).unwrap();
/// assert_eq!(geometry.faces().len(), 4);
/// assert_eq!(geometry.faces()[0], [0, 2, 1]);
/// ```
pub fn parse_obj(source: &str) -> Result<Geometry, PhysicsError> {
    let mut vertices: Vec<Vector3> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();

    for (line_index, raw_line) in source.lines().enumerate() {
        let line_number = line_index + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let coordinates = tokens
                    .take(3)
                    .map(|token| parse_float(token, line_number))
                    .collect::<Result<Vec<f64>, PhysicsError>>()?;
                if coordinates.len() != 3 {
                    return Err(parse_error(line_number, "vertex needs three coordinates"));
                }
                vertices.push((coordinates[0], coordinates[1], coordinates[2]));
            }
            Some("f") => {
                let corners = tokens
                    .map(|token| resolve_index(token, vertices.len(), line_number))
                    .collect::<Result<Vec<usize>, PhysicsError>>()?;
                if corners.len() < 3 {
                    return Err(parse_error(line_number, "face needs at least three vertices"));
                }
                for i in 1..corners.len() - 1 {
                    faces.push([corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {}
        }
    }

    Geometry::new(vertices, faces)
}

fn parse_float(token: &str, line: usize) -> Result<f64, PhysicsError> {
    token
        .parse::<f64>()
        .map_err(|_| parse_error(line, &format!("invalid number '{}'", token)))
}

/// Turns an OBJ index token into a 0-based vertex index.
fn resolve_index(token: &str, vertex_count: usize, line: usize) -> Result<usize, PhysicsError> {
    let index_text = token.split('/').next().unwrap_or(token);
    let index: i64 = index_text
        .parse()
        .map_err(|_| parse_error(line, &format!("invalid index '{}'", token)))?;

    let resolved = match index {
        0 => None,
        i if i > 0 => Some(i as usize - 1),
        i => vertex_count.checked_sub(i.unsigned_abs() as usize),
    };

    match resolved {
        Some(i) if i < vertex_count => Ok(i),
        _ => Err(parse_error(line, &format!("index {} does not refer to a declared vertex", index))),
    }
}

fn parse_error(line: usize, message: &str) -> PhysicsError {
    PhysicsError::ParseError { line, message: message.to_string() }
}
