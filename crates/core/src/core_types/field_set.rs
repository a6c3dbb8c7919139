//! The generated field set handed to extraction and rendering

use crate::core_types::field::{Field3D, FieldKind};
use crate::error::{SynthError, SynthResult};
use crate::grid::{LatLonGrid, TimeAxis};
use serde::Serialize;

/// All gridded quantities for one generation call
///
/// Immutable once built. Every field shares the `(T, n_lat, n_lon)` shape of
/// the time axis and grid it carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSet {
    grid: LatLonGrid,
    times: TimeAxis,
    temperature: Field3D,
    u_wind: Field3D,
    v_wind: Field3D,
    pressure: Field3D,
    precipitation: Field3D,
}

impl FieldSet {
    /// Assemble a field set, checking every field against the grid and time axis
    ///
    /// # Errors
    ///
    /// - [`SynthError::ShapeMismatch`] if a field's shape disagrees with `grid`/`times`
    /// - [`SynthError::InvalidParameter`] if a field is passed in the wrong slot
    pub fn new(
        grid: LatLonGrid,
        times: TimeAxis,
        temperature: Field3D,
        u_wind: Field3D,
        v_wind: Field3D,
        pressure: Field3D,
        precipitation: Field3D,
    ) -> SynthResult<Self> {
        let (n_lat, n_lon) = grid.shape();
        let expected = (times.len(), n_lat, n_lon);
        let slots = [
            (FieldKind::Temperature, &temperature),
            (FieldKind::UWind, &u_wind),
            (FieldKind::VWind, &v_wind),
            (FieldKind::Pressure, &pressure),
            (FieldKind::Precipitation, &precipitation),
        ];
        for (kind, field) in slots {
            if field.kind() != kind {
                return Err(SynthError::InvalidParameter {
                    name: "field_set",
                    reason: format!("expected {kind} field, got {}", field.kind()),
                });
            }
            if field.shape() != expected {
                return Err(SynthError::ShapeMismatch {
                    field_set: field.shape(),
                    grid: (n_lat, n_lon),
                });
            }
        }

        Ok(Self {
            grid,
            times,
            temperature,
            u_wind,
            v_wind,
            pressure,
            precipitation,
        })
    }

    pub fn grid(&self) -> &LatLonGrid {
        &self.grid
    }

    pub fn times(&self) -> &TimeAxis {
        &self.times
    }

    /// `(T, n_lat, n_lon)`
    pub fn shape(&self) -> (usize, usize, usize) {
        self.temperature.shape()
    }

    pub fn get(&self, kind: FieldKind) -> &Field3D {
        match kind {
            FieldKind::Temperature => &self.temperature,
            FieldKind::UWind => &self.u_wind,
            FieldKind::VWind => &self.v_wind,
            FieldKind::Pressure => &self.pressure,
            FieldKind::Precipitation => &self.precipitation,
        }
    }

    /// Fields in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &Field3D> {
        FieldKind::ALL.into_iter().map(|kind| self.get(kind))
    }

    /// One `n_lat × n_lon` slab of `kind` at timestep `t`
    pub fn time_slice(&self, kind: FieldKind, t: usize) -> &[f64] {
        self.get(kind).time_slice(t)
    }

    /// Precipitation summed over the window for every cell, row-major by latitude
    pub fn accumulated_precipitation(&self) -> Vec<f64> {
        let (n_times, n_lat, n_lon) = self.shape();
        let mut total = vec![0.0; n_lat * n_lon];
        for t in 0..n_times {
            for (acc, &value) in total.iter_mut().zip(self.precipitation.time_slice(t)) {
                *acc += value;
            }
        }
        total
    }
}
