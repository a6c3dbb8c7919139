//! Error type shared by every stage of the pipeline
//!
//! Configuration problems are caught before any field buffer is allocated.
//! Extraction and report parsing report their own variants so callers can tell
//! a bad scenario apart from a bad query.

use chrono::{DateTime, Utc};

/// Errors produced while validating, generating, extracting or reporting
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthError {
    /// Domain bounds are non-finite or inverted
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Grid resolution below the two points needed to span the domain
    #[error("invalid grid resolution `{0}`: at least 2 points per axis are required")]
    InvalidResolution(usize),

    /// Time window is empty, inverted or past the representable date range
    #[error("invalid time window: offsets {start}..={end} hours from {origin}")]
    InvalidTimeWindow {
        /// Window origin
        origin: DateTime<Utc>,
        /// First offset in hours
        start: i64,
        /// Last offset in hours (inclusive)
        end: i64,
    },

    /// Grid resolution and window length give a field buffer too large to allocate
    #[error("field shape {n_times}x{resolution}x{resolution} exceeds the addressable buffer size")]
    FieldTooLarge {
        /// Hourly steps in the window
        n_times: usize,
        /// Grid points per axis
        resolution: usize,
    },

    /// A generation parameter cannot be used (negative spread, bad probability, ...)
    #[error("invalid generation parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Dotted parameter path, e.g. `temperature.noise_std_dev`
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Extraction target lies strictly outside the domain
    #[error("point ({lat:.4}, {lon:.4}) lies outside the domain")]
    OutOfDomain {
        /// Requested latitude (degrees)
        lat: f64,
        /// Requested longitude (degrees)
        lon: f64,
    },

    /// Grid and field set disagree on dimensions
    #[error("shape mismatch: field set is {field_set:?}, grid is {grid:?}")]
    ShapeMismatch {
        /// `(T, n_lat, n_lon)` of the field set
        field_set: (usize, usize, usize),
        /// `(n_lat, n_lon)` of the grid
        grid: (usize, usize),
    },

    /// Report text could not be parsed back into rows
    #[error("report parse error on line {line}: {reason}")]
    ReportParse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// Scenario file could not be read or written
    #[error("scenario I/O failed: {0}")]
    ConfigIo(String),

    /// Scenario file contents are not valid JSON for a scenario
    #[error("scenario parse failed: {0}")]
    ConfigParse(String),

    /// Report file could not be written
    #[error("failed to write report: {0}")]
    ReportWrite(String),
}

/// Result alias used across the crate
pub type SynthResult<T> = Result<T, SynthError>;
