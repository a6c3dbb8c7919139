//! Point extraction from a generated field set

use crate::analysis::locate::{CellLocator, NearestByAxis};
use crate::analysis::series::ExtractedSeries;
use crate::core_types::{FieldKind, FieldSet, PointOfInterest};
use crate::error::{SynthError, SynthResult};
use crate::grid::LatLonGrid;
use tracing::debug;

/// Samples every field of a [`FieldSet`] at the cell chosen by `L`
#[derive(Debug, Clone, Default)]
pub struct PointExtractor<L = NearestByAxis> {
    locator: L,
}

impl PointExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: CellLocator> PointExtractor<L> {
    pub fn with_locator(locator: L) -> Self {
        Self { locator }
    }

    /// Time series of every field at the cell representing `poi`, plus
    /// derived wind speed and direction
    ///
    /// # Errors
    ///
    /// - [`SynthError::InvalidParameter`] if `poi` has non-finite coordinates
    /// - [`SynthError::OutOfDomain`] if `poi` lies strictly outside the grid's
    ///   domain; edge points are accepted
    /// - [`SynthError::ShapeMismatch`] if `grid` does not match `fields`
    pub fn extract(
        &self,
        fields: &FieldSet,
        grid: &LatLonGrid,
        poi: &PointOfInterest,
    ) -> SynthResult<ExtractedSeries> {
        poi.validate()?;
        if !grid.domain().contains(poi.lat, poi.lon) {
            return Err(SynthError::OutOfDomain {
                lat: poi.lat,
                lon: poi.lon,
            });
        }
        let (_, n_lat, n_lon) = fields.shape();
        if grid.shape() != (n_lat, n_lon) {
            return Err(SynthError::ShapeMismatch {
                field_set: fields.shape(),
                grid: grid.shape(),
            });
        }

        let cell = self.locator.locate(grid, poi.lat, poi.lon);
        debug!(
            "Extracting '{}' at cell ({}, {}) = ({:.3}, {:.3})",
            poi.label, cell.lat_index, cell.lon_index, cell.lat, cell.lon
        );

        let mut series = ExtractedSeries::new(fields.times().times().to_vec(), poi.clone(), cell);
        for kind in FieldKind::ALL {
            let values = fields.get(kind).series_at(cell.lat_index, cell.lon_index);
            series = series.with_series(kind.into(), values)?;
        }
        Ok(series.with_derived_wind())
    }
}
