//! Rectangular lat/lon domain and its regular discretization

use crate::error::{SynthError, SynthResult};
use serde::{Deserialize, Serialize};

/// Geographic bounding box in degrees
///
/// Always finite with `lat_min < lat_max` and `lon_min < lon_max` once built
/// through [`Domain::new`] or checked with [`Domain::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Domain {
    /// Create a validated domain
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidDomain`] if any bound is non-finite or a
    /// pair of bounds is inverted or degenerate.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> SynthResult<Self> {
        let domain = Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        };
        domain.validate()?;
        Ok(domain)
    }

    /// Mato Grosso box used by the default scenario
    pub fn mato_grosso() -> Self {
        Self {
            lat_min: -18.0,
            lat_max: -13.0,
            lon_min: -58.0,
            lon_max: -53.0,
        }
    }

    /// Check the bounds invariant
    ///
    /// Deserialized domains skip [`Domain::new`], so anything read from a
    /// scenario file goes through here before use.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidDomain`] describing the first violation.
    pub fn validate(&self) -> SynthResult<()> {
        let bounds = [self.lat_min, self.lat_max, self.lon_min, self.lon_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(SynthError::InvalidDomain(format!(
                "bounds must be finite, got {bounds:?}"
            )));
        }
        if self.lat_min >= self.lat_max {
            return Err(SynthError::InvalidDomain(format!(
                "lat_min ({}) must be below lat_max ({})",
                self.lat_min, self.lat_max
            )));
        }
        if self.lon_min >= self.lon_max {
            return Err(SynthError::InvalidDomain(format!(
                "lon_min ({}) must be below lon_max ({})",
                self.lon_min, self.lon_max
            )));
        }
        Ok(())
    }

    /// Whether `(lat, lon)` lies inside the box, edges included
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }
}

/// Evenly spaced latitude and longitude axes spanning a [`Domain`]
///
/// Both axes hold `n` points, strictly increasing, with the first and last
/// points on the domain edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatLonGrid {
    domain: Domain,
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl LatLonGrid {
    /// Discretize `domain` into `resolution` points per axis
    ///
    /// # Errors
    ///
    /// - [`SynthError::InvalidDomain`] if the domain is malformed
    /// - [`SynthError::InvalidResolution`] if `resolution < 2`
    pub fn new(domain: Domain, resolution: usize) -> SynthResult<Self> {
        domain.validate()?;
        if resolution < 2 {
            return Err(SynthError::InvalidResolution(resolution));
        }
        Ok(Self {
            lats: linspace(domain.lat_min, domain.lat_max, resolution),
            lons: linspace(domain.lon_min, domain.lon_max, resolution),
            domain,
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Latitudes, south to north
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitudes, west to east
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Points per axis
    pub fn resolution(&self) -> usize {
        self.lats.len()
    }

    /// `(n_lat, n_lon)`
    pub fn shape(&self) -> (usize, usize) {
        (self.lats.len(), self.lons.len())
    }
}

/// `n` evenly spaced values from `start` to `end`, both ends exact
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
    // Pin the last point so the axis ends on the domain edge despite rounding
    values[n - 1] = end;
    values
}
