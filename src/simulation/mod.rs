mod collision_resolver;
mod frame_report;

pub use collision_resolver::*;
pub use frame_report::*;
