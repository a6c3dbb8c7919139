//! Point time series taken from a field set

use crate::analysis::locate::GridCell;
use crate::core_types::{FieldKind, PointOfInterest};
use crate::error::{SynthError, SynthResult};
use chrono::{DateTime, Utc};
use std::fmt;

/// Series carried by an [`ExtractedSeries`]: the five gridded fields plus
/// the two derived wind quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeriesKind {
    Temperature,
    UWind,
    VWind,
    Pressure,
    Precipitation,
    /// `sqrt(u² + v²)`, m/s
    WindSpeed,
    /// `atan2(v, u)` in degrees, counter-clockwise from east, in (-180, 180]
    WindDirection,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 7] = [
        SeriesKind::Temperature,
        SeriesKind::UWind,
        SeriesKind::VWind,
        SeriesKind::Pressure,
        SeriesKind::Precipitation,
        SeriesKind::WindSpeed,
        SeriesKind::WindDirection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SeriesKind::WindSpeed => "wind_speed",
            SeriesKind::WindDirection => "wind_direction",
            other => other.field().map_or("", FieldKind::name),
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            SeriesKind::WindSpeed => "m/s",
            SeriesKind::WindDirection => "°",
            other => other.field().map_or("", FieldKind::unit),
        }
    }

    /// Gridded field backing this series, `None` for derived series
    pub fn field(self) -> Option<FieldKind> {
        match self {
            SeriesKind::Temperature => Some(FieldKind::Temperature),
            SeriesKind::UWind => Some(FieldKind::UWind),
            SeriesKind::VWind => Some(FieldKind::VWind),
            SeriesKind::Pressure => Some(FieldKind::Pressure),
            SeriesKind::Precipitation => Some(FieldKind::Precipitation),
            SeriesKind::WindSpeed | SeriesKind::WindDirection => None,
        }
    }
}

impl From<FieldKind> for SeriesKind {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Temperature => SeriesKind::Temperature,
            FieldKind::UWind => SeriesKind::UWind,
            FieldKind::VWind => SeriesKind::VWind,
            FieldKind::Pressure => SeriesKind::Pressure,
            FieldKind::Precipitation => SeriesKind::Precipitation,
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Time series at one grid cell
///
/// Every series is optional. Consumers ask [`ExtractedSeries::series`] and
/// skip what is absent. Present series all have one value per timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSeries {
    times: Vec<DateTime<Utc>>,
    point: PointOfInterest,
    cell: GridCell,
    temperature: Option<Vec<f64>>,
    u_wind: Option<Vec<f64>>,
    v_wind: Option<Vec<f64>>,
    pressure: Option<Vec<f64>>,
    precipitation: Option<Vec<f64>>,
    wind_speed: Option<Vec<f64>>,
    wind_direction: Option<Vec<f64>>,
}

impl ExtractedSeries {
    /// Empty series set for `point`, sampled at `cell`
    pub fn new(times: Vec<DateTime<Utc>>, point: PointOfInterest, cell: GridCell) -> Self {
        Self {
            times,
            point,
            cell,
            temperature: None,
            u_wind: None,
            v_wind: None,
            pressure: None,
            precipitation: None,
            wind_speed: None,
            wind_direction: None,
        }
    }

    fn slot_mut(&mut self, kind: SeriesKind) -> &mut Option<Vec<f64>> {
        match kind {
            SeriesKind::Temperature => &mut self.temperature,
            SeriesKind::UWind => &mut self.u_wind,
            SeriesKind::VWind => &mut self.v_wind,
            SeriesKind::Pressure => &mut self.pressure,
            SeriesKind::Precipitation => &mut self.precipitation,
            SeriesKind::WindSpeed => &mut self.wind_speed,
            SeriesKind::WindDirection => &mut self.wind_direction,
        }
    }

    /// Attach `values` as the `kind` series
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidParameter`] if `values` does not have one
    /// entry per timestamp.
    pub fn with_series(mut self, kind: SeriesKind, values: Vec<f64>) -> SynthResult<Self> {
        if values.len() != self.times.len() {
            return Err(SynthError::InvalidParameter {
                name: "series",
                reason: format!(
                    "{kind} has {} values for {} timestamps",
                    values.len(),
                    self.times.len()
                ),
            });
        }
        *self.slot_mut(kind) = Some(values);
        Ok(self)
    }

    /// Drop the `kind` series
    pub fn without(mut self, kind: SeriesKind) -> Self {
        *self.slot_mut(kind) = None;
        self
    }

    /// Fill wind speed and direction from the u/v components
    ///
    /// Leaves both derived series absent when either component is missing.
    pub fn with_derived_wind(mut self) -> Self {
        if let (Some(u), Some(v)) = (&self.u_wind, &self.v_wind) {
            let speed = u.iter().zip(v).map(|(&u, &v)| u.hypot(v)).collect();
            let direction = u
                .iter()
                .zip(v)
                .map(|(&u, &v)| v.atan2(u).to_degrees())
                .collect();
            self.wind_speed = Some(speed);
            self.wind_direction = Some(direction);
        }
        self
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn point(&self) -> &PointOfInterest {
        &self.point
    }

    pub fn cell(&self) -> GridCell {
        self.cell
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn series(&self, kind: SeriesKind) -> Option<&[f64]> {
        match kind {
            SeriesKind::Temperature => self.temperature.as_deref(),
            SeriesKind::UWind => self.u_wind.as_deref(),
            SeriesKind::VWind => self.v_wind.as_deref(),
            SeriesKind::Pressure => self.pressure.as_deref(),
            SeriesKind::Precipitation => self.precipitation.as_deref(),
            SeriesKind::WindSpeed => self.wind_speed.as_deref(),
            SeriesKind::WindDirection => self.wind_direction.as_deref(),
        }
    }

    pub fn has(&self, kind: SeriesKind) -> bool {
        self.series(kind).is_some()
    }

    /// Kinds that are absent, in canonical order
    pub fn missing(&self) -> Vec<SeriesKind> {
        SeriesKind::ALL
            .into_iter()
            .filter(|&kind| !self.has(kind))
            .collect()
    }
}
