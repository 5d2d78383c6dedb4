mod constants;
mod constants_config;
mod errors;
mod vector_math;

pub use constants::*;
pub use constants_config::*;
pub use errors::*;
pub use vector_math::*;

#[cfg(test)]
mod vector_math_tests;
#[cfg(test)]
mod constants_config_tests;
