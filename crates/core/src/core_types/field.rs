//! Dense time-major field buffers
//!
//! Every gridded quantity is stored as a flat `Vec<f64>` indexed by
//! `(t, i, j)` with `i` the latitude index and `j` the longitude index:
//! `index = (t * n_lat + i) * n_lon + j`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gridded quantities produced by the field generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// 2 m air temperature, °C
    Temperature,
    /// Zonal wind component (positive eastward), m/s
    UWind,
    /// Meridional wind component (positive northward), m/s
    VWind,
    /// Surface pressure, hPa
    Pressure,
    /// Hourly precipitation, mm, never negative
    Precipitation,
}

impl FieldKind {
    /// All gridded fields in canonical order
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Temperature,
        FieldKind::UWind,
        FieldKind::VWind,
        FieldKind::Pressure,
        FieldKind::Precipitation,
    ];

    /// Field name as used by rendering collaborators
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Temperature => "temperature",
            FieldKind::UWind => "u_wind",
            FieldKind::VWind => "v_wind",
            FieldKind::Pressure => "pressure",
            FieldKind::Precipitation => "precipitation",
        }
    }

    /// Fixed unit of the stored values
    pub fn unit(self) -> &'static str {
        match self {
            FieldKind::Temperature => "°C",
            FieldKind::UWind | FieldKind::VWind => "m/s",
            FieldKind::Pressure => "hPa",
            FieldKind::Precipitation => "mm",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One quantity over the whole `(T, n_lat, n_lon)` cube
///
/// Serialize only: every buffer goes through the length check in
/// [`Field3D::from_vec`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field3D {
    kind: FieldKind,
    data: Vec<f64>,
    n_times: usize,
    n_lat: usize,
    n_lon: usize,
}

impl Field3D {
    /// Wrap an existing time-major buffer
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != n_times * n_lat * n_lon`.
    pub fn from_vec(
        kind: FieldKind,
        data: Vec<f64>,
        n_times: usize,
        n_lat: usize,
        n_lon: usize,
    ) -> Self {
        assert_eq!(
            data.len(),
            n_times * n_lat * n_lon,
            "Buffer length does not match shape"
        );
        Self {
            kind,
            data,
            n_times,
            n_lat,
            n_lon,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// `(T, n_lat, n_lon)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n_times, self.n_lat, self.n_lon)
    }

    /// Raw time-major buffer
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn index(&self, t: usize, i: usize, j: usize) -> usize {
        assert!(
            t < self.n_times && i < self.n_lat && j < self.n_lon,
            "Coordinates out of bounds"
        );
        (t * self.n_lat + i) * self.n_lon + j
    }

    /// Value at timestep `t`, latitude index `i`, longitude index `j`
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn get(&self, t: usize, i: usize, j: usize) -> f64 {
        self.data[self.index(t, i, j)]
    }

    /// The `n_lat × n_lon` slab at timestep `t`, row-major by latitude
    pub fn time_slice(&self, t: usize) -> &[f64] {
        assert!(t < self.n_times, "Timestep out of bounds");
        let plane = self.n_lat * self.n_lon;
        &self.data[t * plane..(t + 1) * plane]
    }

    /// Time series at a fixed cell
    pub fn series_at(&self, i: usize, j: usize) -> Vec<f64> {
        (0..self.n_times).map(|t| self.get(t, i, j)).collect()
    }

    /// Smallest and largest value over the cube, `None` when empty
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let first = *self.data.first()?;
        Some(
            self.data
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }
}
