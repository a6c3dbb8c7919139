//! Domain, lat/lon grid and time axis

pub mod domain;
pub mod time_axis;

// Re-export main types
pub use domain::*;
pub use time_axis::*;
