//! Synthetic Weather Field Generator
//!
//! Stands in for numerical-weather-model output when no forecast feed is
//! available. Fabricates hourly gridded temperature, wind, pressure and
//! precipitation over a rectangular lat/lon domain from parametric diurnal
//! and spatial models plus seeded noise, then samples one point of interest
//! and renders a fixed-format text report.
//!
//! ## Pipeline
//!
//! - [`grid`]: domain, lat/lon axes and hourly time axis
//! - [`weather`]: field generation ([`FieldGenerator`])
//! - [`analysis`]: point extraction, summary statistics and the report
//! - [`config`] / [`scenario`]: serializable inputs and the end-to-end run
//!
//! Output is deterministic: the same inputs and seed give bit-identical
//! fields regardless of thread count.

pub mod analysis;
pub mod config;
pub mod core_types;
pub mod error;
pub mod grid;
pub mod scenario;
pub mod weather;

// Re-export the types most callers need
pub use analysis::{
    parse_table, render, summarize, CellLocator, ExtractedSeries, NearestByAxis, PointExtractor,
    Report, ReportHeader, SeriesKind, Summary,
};
pub use config::ScenarioConfig;
pub use core_types::{Field3D, FieldKind, FieldSet, PointOfInterest};
pub use error::{SynthError, SynthResult};
pub use grid::{Domain, LatLonGrid, TimeAxis, TimeWindow};
pub use scenario::{run, ScenarioOutput};
pub use weather::{FieldGenerator, FixedSeedPerCall, GenerationParams};
