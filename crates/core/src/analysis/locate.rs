//! Grid cell selection for point extraction

use crate::grid::LatLonGrid;

/// A selected grid cell: indices plus the cell's own coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub lat_index: usize,
    pub lon_index: usize,
    pub lat: f64,
    pub lon: f64,
}

/// Strategy for mapping a coordinate onto a grid cell
pub trait CellLocator {
    /// Cell of `grid` representing `(lat, lon)`
    ///
    /// `grid` always has at least two points per axis.
    fn locate(&self, grid: &LatLonGrid, lat: f64, lon: f64) -> GridCell;
}

/// Index of the value in `axis` closest to `target`, first one on ties
fn nearest_index(axis: &[f64], target: f64) -> usize {
    axis.iter()
        .enumerate()
        .fold((0, f64::INFINITY), |(best, best_dist), (idx, &value)| {
            let dist = (value - target).abs();
            if dist < best_dist {
                (idx, dist)
            } else {
                (best, best_dist)
            }
        })
        .0
}

/// Minimize `|lat_i - lat|` and `|lon_j - lon|` independently
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestByAxis;

impl CellLocator for NearestByAxis {
    fn locate(&self, grid: &LatLonGrid, lat: f64, lon: f64) -> GridCell {
        let lat_index = nearest_index(grid.lats(), lat);
        let lon_index = nearest_index(grid.lons(), lon);
        GridCell {
            lat_index,
            lon_index,
            lat: grid.lats()[lat_index],
            lon: grid.lons()[lon_index],
        }
    }
}

/// Minimize the planar distance in degrees over every cell
///
/// On a regular grid this agrees with [`NearestByAxis`] except on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestEuclidean;

impl CellLocator for NearestEuclidean {
    fn locate(&self, grid: &LatLonGrid, lat: f64, lon: f64) -> GridCell {
        let mut best = GridCell {
            lat_index: 0,
            lon_index: 0,
            lat: grid.lats()[0],
            lon: grid.lons()[0],
        };
        let mut best_dist = f64::INFINITY;
        for (i, &cell_lat) in grid.lats().iter().enumerate() {
            for (j, &cell_lon) in grid.lons().iter().enumerate() {
                let dist = (cell_lat - lat).hypot(cell_lon - lon);
                if dist < best_dist {
                    best_dist = dist;
                    best = GridCell {
                        lat_index: i,
                        lon_index: j,
                        lat: cell_lat,
                        lon: cell_lon,
                    };
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Domain;

    fn grid(resolution: usize) -> LatLonGrid {
        LatLonGrid::new(Domain::mato_grosso(), resolution).unwrap()
    }

    #[test]
    fn test_nearest_by_axis_on_example_grid() {
        // lats/lons step 1.25°: -15.46 -> -15.5 (i=2), -55.75 -> -55.5 (j=2)
        let cell = NearestByAxis.locate(&grid(5), -15.46, -55.75);
        assert_eq!((cell.lat_index, cell.lon_index), (2, 2));
        assert_eq!((cell.lat, cell.lon), (-15.5, -55.5));
    }

    #[test]
    fn test_selected_indices_minimize_axis_distance() {
        let g = grid(17);
        for &(lat, lon) in &[(-17.9, -57.2), (-13.01, -53.4), (-15.46, -55.75), (-16.3, -54.0)] {
            let cell = NearestByAxis.locate(&g, lat, lon);
            let lat_dist = (g.lats()[cell.lat_index] - lat).abs();
            let lon_dist = (g.lons()[cell.lon_index] - lon).abs();
            assert!(g.lats().iter().all(|&l| (l - lat).abs() >= lat_dist));
            assert!(g.lons().iter().all(|&l| (l - lon).abs() >= lon_dist));
        }
    }

    #[test]
    fn test_domain_corners_map_to_corner_cells() {
        let g = grid(6);
        let sw = NearestByAxis.locate(&g, -18.0, -58.0);
        let ne = NearestByAxis.locate(&g, -13.0, -53.0);
        assert_eq!((sw.lat_index, sw.lon_index), (0, 0));
        assert_eq!((ne.lat_index, ne.lon_index), (5, 5));
    }

    #[test]
    fn test_euclidean_agrees_away_from_ties() {
        let g = grid(9);
        for &(lat, lon) in &[(-17.1, -57.7), (-15.46, -55.75), (-13.3, -53.9)] {
            assert_eq!(
                NearestByAxis.locate(&g, lat, lon),
                NearestEuclidean.locate(&g, lat, lon)
            );
        }
    }
}
