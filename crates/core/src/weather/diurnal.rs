//! 24-hour sinusoidal cycle shared by every generated quantity

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// `mean + amplitude * sin((hour - phase_hours) * π / 12)`
///
/// With a 24 h period the wave crosses `mean` rising at `phase_hours` and peaks
/// six hours later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiurnalWave {
    pub mean: f64,
    pub amplitude: f64,
    pub phase_hours: f64,
}

impl DiurnalWave {
    pub const fn new(mean: f64, amplitude: f64, phase_hours: f64) -> Self {
        Self {
            mean,
            amplitude,
            phase_hours,
        }
    }

    /// Value at `hour` (hour of day, UTC)
    #[inline]
    pub fn value_at(&self, hour: f64) -> f64 {
        self.mean + self.amplitude * ((hour - self.phase_hours) * PI / 12.0).sin()
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.amplitude.is_finite() && self.phase_hours.is_finite()
    }
}
