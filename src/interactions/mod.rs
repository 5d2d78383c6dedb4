mod broad_phase;
mod continuous_collision_detection;
mod impulse_response;
mod narrow_phase;

pub use broad_phase::*;
pub use continuous_collision_detection::*;
pub use impulse_response::*;
pub use narrow_phase::*;

#[cfg(test)]
mod broad_phase_tests;
