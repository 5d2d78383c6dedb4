mod body_state;
mod collision;
mod geometry;
mod mass_properties;
mod mesh_loader;
mod rigid_body;

pub use body_state::*;
pub use collision::*;
pub use geometry::*;
pub use mass_properties::*;
pub use mesh_loader::*;
pub use rigid_body::*;

#[cfg(test)]
mod geometry_tests;
#[cfg(test)]
mod rigid_body_tests;
