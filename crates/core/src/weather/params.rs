//! Generation parameters
//!
//! Defaults reproduce the March afternoon pattern over Mato Grosso: a strong
//! diurnal temperature swing, an easterly breeze that backs through the
//! afternoon, a semi-diurnal-looking pressure wave and convective rain that
//! starts at local noon (15 UTC) and becomes more likely into the evening.

use crate::error::{SynthError, SynthResult};
use crate::weather::diurnal::DiurnalWave;
use serde::{Deserialize, Serialize};

/// Temperature model (°C)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureModel {
    /// Grid-wide diurnal cycle
    pub diurnal: DiurnalWave,
    /// Warming per degree north of `lat_min` (°C/°)
    pub lat_gradient: f64,
    /// Continentality: warming per degree east of `lon_min` (°C/°)
    pub lon_gradient: f64,
    /// Cooling applied near the point of interest (°C, positive = colder)
    pub elevation_cooling: f64,
    /// Half-width of the cooling box (°)
    pub elevation_radius_deg: f64,
    /// Standard deviation of per-cell Gaussian noise (°C)
    pub noise_std_dev: f64,
}

impl Default for TemperatureModel {
    fn default() -> Self {
        Self {
            diurnal: DiurnalWave::new(26.0, 7.0, 6.0),
            lat_gradient: 1.5,
            lon_gradient: 0.5,
            elevation_cooling: 4.0,
            elevation_radius_deg: 0.3,
            noise_std_dev: 1.5,
        }
    }
}

impl TemperatureModel {
    /// Grid-wide component at `hour`, before spatial terms and noise
    pub fn base_at(&self, hour: u32) -> f64 {
        self.diurnal.value_at(f64::from(hour))
    }
}

/// Surface wind model (m/s)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindModel {
    /// Zonal component cycle
    pub u: DiurnalWave,
    /// Meridional component cycle
    pub v: DiurnalWave,
    /// Added to `u` near the point of interest (topographic channeling)
    pub channel_u: f64,
    /// Added to `v` near the point of interest
    pub channel_v: f64,
    /// Half-width of the channeling box (°)
    pub channel_radius_deg: f64,
    /// Standard deviation of per-cell Gaussian noise, each component (m/s)
    pub noise_std_dev: f64,
}

impl Default for WindModel {
    fn default() -> Self {
        Self {
            u: DiurnalWave::new(-3.0, 4.0, 12.0),
            v: DiurnalWave::new(1.0, 2.0, 9.0),
            channel_u: 2.0,
            channel_v: 1.0,
            channel_radius_deg: 0.2,
            noise_std_dev: 1.0,
        }
    }
}

/// Surface pressure model (hPa)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureModel {
    /// Grid-wide cycle; there is no deterministic spatial gradient
    pub diurnal: DiurnalWave,
    /// Standard deviation of per-cell Gaussian noise (hPa)
    pub noise_std_dev: f64,
}

impl Default for PressureModel {
    fn default() -> Self {
        Self {
            diurnal: DiurnalWave::new(1012.0, 2.0, 14.0),
            noise_std_dev: 2.0,
        }
    }
}

/// Convective precipitation model (mm per hour)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecipitationModel {
    /// Hour of day (UTC) before which precipitation is exactly zero
    pub onset_hour: u32,
    /// Hours after onset for the rain probability to reach its cap
    pub ramp_hours: f64,
    /// Probability cap per cell and step
    pub max_probability: f64,
    /// Mean of the exponential rain amount (mm)
    pub mean_amount_mm: f64,
    /// Amount multiplier near the point of interest
    pub orographic_multiplier: f64,
    /// Half-width of the orographic box (°)
    pub orographic_radius_deg: f64,
    /// Amounts below this are snapped to exactly zero (mm)
    pub min_amount_mm: f64,
}

impl Default for PrecipitationModel {
    fn default() -> Self {
        Self {
            onset_hour: 15,
            ramp_hours: 8.0,
            max_probability: 0.3,
            mean_amount_mm: 3.0,
            orographic_multiplier: 2.0,
            orographic_radius_deg: 0.3,
            min_amount_mm: 0.1,
        }
    }
}

impl PrecipitationModel {
    /// Per-cell rain probability at `hour`
    ///
    /// Zero before onset, then rising linearly with elapsed hours until it
    /// reaches `max_probability`.
    pub fn probability_at(&self, hour: u32) -> f64 {
        if hour < self.onset_hour {
            return 0.0;
        }
        let elapsed = f64::from(hour - self.onset_hour);
        (elapsed / self.ramp_hours).min(1.0) * self.max_probability
    }
}

/// Every tunable of the field generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub temperature: TemperatureModel,
    pub wind: WindModel,
    pub pressure: PressureModel,
    pub precipitation: PrecipitationModel,
}

fn check(name: &'static str, ok: bool, reason: impl FnOnce() -> String) -> SynthResult<()> {
    if ok {
        Ok(())
    } else {
        Err(SynthError::InvalidParameter {
            name,
            reason: reason(),
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> SynthResult<()> {
    check(name, value.is_finite() && value >= 0.0, || {
        format!("must be finite and non-negative, got {value}")
    })
}

fn finite(name: &'static str, value: f64) -> SynthResult<()> {
    check(name, value.is_finite(), || format!("must be finite, got {value}"))
}

impl GenerationParams {
    /// Check every parameter before anything is allocated
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidParameter`] naming the first bad parameter.
    pub fn validate(&self) -> SynthResult<()> {
        let t = &self.temperature;
        check("temperature.diurnal", t.diurnal.is_finite(), || {
            format!("must be finite, got {:?}", t.diurnal)
        })?;
        finite("temperature.lat_gradient", t.lat_gradient)?;
        finite("temperature.lon_gradient", t.lon_gradient)?;
        finite("temperature.elevation_cooling", t.elevation_cooling)?;
        non_negative("temperature.elevation_radius_deg", t.elevation_radius_deg)?;
        non_negative("temperature.noise_std_dev", t.noise_std_dev)?;

        let w = &self.wind;
        check("wind.u", w.u.is_finite(), || format!("must be finite, got {:?}", w.u))?;
        check("wind.v", w.v.is_finite(), || format!("must be finite, got {:?}", w.v))?;
        finite("wind.channel_u", w.channel_u)?;
        finite("wind.channel_v", w.channel_v)?;
        non_negative("wind.channel_radius_deg", w.channel_radius_deg)?;
        non_negative("wind.noise_std_dev", w.noise_std_dev)?;

        let p = &self.pressure;
        check("pressure.diurnal", p.diurnal.is_finite(), || {
            format!("must be finite, got {:?}", p.diurnal)
        })?;
        non_negative("pressure.noise_std_dev", p.noise_std_dev)?;

        let r = &self.precipitation;
        check("precipitation.onset_hour", r.onset_hour <= 24, || {
            format!("must be an hour of day (0-24), got {}", r.onset_hour)
        })?;
        check(
            "precipitation.ramp_hours",
            r.ramp_hours.is_finite() && r.ramp_hours > 0.0,
            || format!("must be positive, got {}", r.ramp_hours),
        )?;
        check(
            "precipitation.max_probability",
            (0.0..=1.0).contains(&r.max_probability),
            || format!("must lie in [0, 1], got {}", r.max_probability),
        )?;
        check(
            "precipitation.mean_amount_mm",
            r.mean_amount_mm.is_finite() && r.mean_amount_mm > 0.0,
            || format!("must be positive, got {}", r.mean_amount_mm),
        )?;
        non_negative(
            "precipitation.orographic_multiplier",
            r.orographic_multiplier,
        )?;
        non_negative(
            "precipitation.orographic_radius_deg",
            r.orographic_radius_deg,
        )?;
        non_negative("precipitation.min_amount_mm", r.min_amount_mm)?;
        Ok(())
    }
}
