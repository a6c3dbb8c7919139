//! Core types shared by generation, extraction and reporting

pub mod field;
pub mod field_set;
pub mod point;

// Re-export
pub use field::{Field3D, FieldKind};
pub use field_set::FieldSet;
pub use point::PointOfInterest;
