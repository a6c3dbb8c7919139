//! Scenario configuration
//!
//! Every input of a run in one serializable struct, loaded from and saved to
//! JSON. Missing keys fall back to the Mato Grosso defaults.

use crate::core_types::PointOfInterest;
use crate::error::{SynthError, SynthResult};
use crate::grid::{Domain, TimeWindow};
use crate::weather::GenerationParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One synthetic run: where, when, how fine and with which seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// First line of the report title block
    pub title: String,
    pub domain: Domain,
    /// Grid points per axis, at least 2
    pub resolution: usize,
    pub window: TimeWindow,
    pub point: PointOfInterest,
    pub seed: u64,
    pub params: GenerationParams,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            title: "Synthetic weather - Chapada dos Guimarães, Mato Grosso".to_string(),
            domain: Domain::mato_grosso(),
            resolution: 167, // ~3 km spacing
            window: TimeWindow::default(),
            point: PointOfInterest::chapada_dos_guimaraes(),
            seed: 42,
            params: GenerationParams::default(),
        }
    }
}

impl ScenarioConfig {
    /// Load a scenario from a JSON file
    ///
    /// # Errors
    ///
    /// - [`SynthError::ConfigIo`] if the file cannot be read
    /// - [`SynthError::ConfigParse`] if it is not a valid scenario
    pub fn load<P: AsRef<Path>>(path: P) -> SynthResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SynthError::ConfigIo(format!("{}: {e}", path.display())))?;
        Self::from_json(&contents)
    }

    /// Parse a scenario from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::ConfigParse`] on malformed JSON or mistyped keys.
    pub fn from_json(json: &str) -> SynthResult<Self> {
        serde_json::from_str(json).map_err(|e| SynthError::ConfigParse(e.to_string()))
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::ConfigParse`] if serialization fails.
    pub fn to_json(&self) -> SynthResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SynthError::ConfigParse(e.to_string()))
    }

    /// Save the scenario as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::ConfigIo`] if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SynthResult<()> {
        let path = path.as_ref();
        let contents = self.to_json()?;
        fs::write(path, contents)
            .map_err(|e| SynthError::ConfigIo(format!("{}: {e}", path.display())))
    }

    /// Check every input before generation
    ///
    /// The point of interest must lie inside the domain, since it is also the
    /// extraction target.
    ///
    /// # Errors
    ///
    /// Returns the first [`SynthError`] found.
    pub fn validate(&self) -> SynthResult<()> {
        self.domain.validate()?;
        if self.resolution < 2 {
            return Err(SynthError::InvalidResolution(self.resolution));
        }
        self.window.validate()?;
        self.point.validate()?;
        if !self.domain.contains(self.point.lat, self.point.lon) {
            return Err(SynthError::OutOfDomain {
                lat: self.point.lat,
                lon: self.point.lon,
            });
        }
        self.params.validate()
    }
}
