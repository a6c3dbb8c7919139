//! Named point of interest

use crate::error::{SynthError, SynthResult};
use serde::{Deserialize, Serialize};

/// A single named coordinate of meteorological interest
///
/// Serves twice: as the center of the local perturbations applied during
/// generation (cooler elevated terrain, channeled wind, orographic rain) and
/// as the target the point extractor samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Human-readable name used in reports
    pub label: String,
}

impl PointOfInterest {
    pub fn new(lat: f64, lon: f64, label: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            label: label.into(),
        }
    }

    /// Chapada dos Guimarães plateau, Mato Grosso
    pub fn chapada_dos_guimaraes() -> Self {
        Self::new(-15.46, -55.75, "Chapada dos Guimarães")
    }

    /// Box test used by every local perturbation
    ///
    /// True when both `|lat - self.lat|` and `|lon - self.lon|` are strictly
    /// below `half_width` degrees.
    #[inline]
    pub fn is_near(&self, lat: f64, lon: f64, half_width: f64) -> bool {
        (lat - self.lat).abs() < half_width && (lon - self.lon).abs() < half_width
    }

    /// # Errors
    ///
    /// Returns [`SynthError::InvalidParameter`] if either coordinate is not finite.
    pub fn validate(&self) -> SynthResult<()> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(SynthError::InvalidParameter {
                name: "point_of_interest",
                reason: format!("coordinates must be finite, got ({}, {})", self.lat, self.lon),
            });
        }
        Ok(())
    }
}

impl Default for PointOfInterest {
    fn default() -> Self {
        Self::chapada_dos_guimaraes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_near_is_a_strict_box() {
        let poi = PointOfInterest::new(0.0, 0.0, "origin");
        assert!(poi.is_near(0.29, -0.29, 0.3));
        assert!(!poi.is_near(0.3, 0.0, 0.3));
        assert!(!poi.is_near(0.1, 0.31, 0.3));
    }

    #[test]
    fn test_non_finite_point_is_rejected() {
        assert!(PointOfInterest::new(f64::NAN, 0.0, "bad").validate().is_err());
        assert!(PointOfInterest::chapada_dos_guimaraes().validate().is_ok());
    }
}
