// rs_rigid_body_wasm/src/lib.rs
// Browser-facing wrapper around the rigid-body simulation.

use wasm_bindgen::prelude::*;
use js_sys::Float64Array;
use rs_rigid_body::models::parse_obj;
use rs_rigid_body::{BodyInit, Geometry, Matrix3, PhysicsError, Simulation, SimulationConfig, Vector3};

fn to_js_error(error: PhysicsError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn vector_from_slice(values: &[f64], what: &str) -> Result<Vector3, String> {
    match values {
        [x, y, z] => Ok((*x, *y, *z)),
        _ => Err(format!("{} needs exactly three components", what)),
    }
}

/// Reads a rotation matrix from nine row-major values.
fn matrix_from_slice(values: &[f64]) -> Result<Matrix3, String> {
    match values {
        [a, b, c, d, e, f, g, h, i] => Ok([[*a, *b, *c], [*d, *e, *f], [*g, *h, *i]]),
        _ => Err(String::from("orientation needs nine row-major components")),
    }
}

/// Initial state of a body from the flat arrays JS passes in. A missing
/// orientation means identity and a missing angular velocity means no spin.
fn body_init(
    position: &[f64],
    velocity: &[f64],
    restitution: f64,
    orientation: Option<&[f64]>,
    angular_velocity: Option<&[f64]>,
) -> Result<BodyInit, String> {
    let mut init = BodyInit {
        velocity: vector_from_slice(velocity, "velocity")?,
        restitution,
        ..BodyInit::at(vector_from_slice(position, "position")?)
    };
    if let Some(values) = orientation {
        init.orientation = matrix_from_slice(values)?;
    }
    if let Some(values) = angular_velocity {
        init.angular_velocity = vector_from_slice(values, "angular velocity")?;
    }
    Ok(init)
}

#[wasm_bindgen]
pub struct WasmSimulation {
    simulation: Simulation,
    triangles: Vec<f64>,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Default configuration: midpoint integration at 60 frames per second with a ground plane.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmSimulation, JsValue> {
        Self::with_step(SimulationConfig::default().step_size)
    }

    pub fn with_step(step_size: f64) -> Result<WasmSimulation, JsValue> {
        let config = SimulationConfig { step_size, ..SimulationConfig::default() };
        let simulation = Simulation::new(config).map_err(to_js_error)?;
        Ok(Self { simulation, triangles: Vec::new() })
    }

    /// Adds a body from Wavefront OBJ text at `position` with linear `velocity`.
    ///
    /// `orientation` takes nine row-major values and defaults to identity;
    /// `angular_velocity` defaults to zero.
    #[allow(clippy::too_many_arguments)]
    pub fn add_obj_body(
        &mut self,
        source: &str,
        mass: f64,
        position: &[f64],
        velocity: &[f64],
        restitution: f64,
        orientation: Option<Vec<f64>>,
        angular_velocity: Option<Vec<f64>>,
    ) -> Result<usize, JsValue> {
        let geometry = parse_obj(source).map_err(to_js_error)?;
        let init = body_init(position, velocity, restitution, orientation.as_deref(), angular_velocity.as_deref())
            .map_err(|message| JsValue::from_str(&message))?;
        self.add(geometry, mass, init)
    }

    /// Adds a body from flat `x, y, z` vertex and 0-based triangle index arrays.
    ///
    /// The optional arguments behave as in `add_obj_body`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_mesh_body(
        &mut self,
        vertices: &[f64],
        indices: &[u32],
        mass: f64,
        position: &[f64],
        velocity: &[f64],
        restitution: f64,
        orientation: Option<Vec<f64>>,
        angular_velocity: Option<Vec<f64>>,
    ) -> Result<usize, JsValue> {
        if vertices.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Err(JsValue::from_str("vertex and index arrays must come in triples"));
        }
        let points = vertices.chunks_exact(3).map(|v| (v[0], v[1], v[2])).collect();
        let faces = indices
            .chunks_exact(3)
            .map(|f| [f[0] as usize, f[1] as usize, f[2] as usize])
            .collect();
        let geometry = Geometry::new(points, faces).map_err(to_js_error)?;
        let init = body_init(position, velocity, restitution, orientation.as_deref(), angular_velocity.as_deref())
            .map_err(|message| JsValue::from_str(&message))?;
        self.add(geometry, mass, init)
    }

    pub fn remove_body(&mut self, index: usize) -> bool {
        self.simulation.remove_body(index).is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize {
        self.simulation.bodies().len()
    }

    #[wasm_bindgen(getter)]
    pub fn elapsed(&self) -> f64 {
        self.simulation.elapsed()
    }

    /// Advances one frame and returns the number of contacts resolved.
    pub fn step_frame(&mut self) -> usize {
        let report = self.simulation.step_frame();
        if report.budget_exceeded {
            web_sys::console::warn_1(&JsValue::from_str("rigid body iteration budget exceeded"));
        }
        report.contacts_resolved
    }

    /// World-space triangles of every body, nine values per face.
    pub fn triangles(&mut self) -> Float64Array {
        self.triangles.clear();
        self.simulation.write_world_triangles(&mut self.triangles);
        Float64Array::from(self.triangles.as_slice())
    }

    /// Center-of-mass position of body `index` as `[x, y, z]`.
    pub fn position(&self, index: usize) -> Option<Vec<f64>> {
        self.simulation.body(index).map(|body| {
            let (x, y, z) = body.position();
            vec![x, y, z]
        })
    }
}

impl WasmSimulation {
    fn add(&mut self, geometry: Geometry, mass: f64, init: BodyInit) -> Result<usize, JsValue> {
        self.simulation.add_body(geometry, mass, init).map_err(to_js_error)
    }
}
