//! Extrema and totals over an extracted point series

use crate::analysis::series::{ExtractedSeries, SeriesKind};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Statistics of one series over the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    /// Timestep of the first minimum
    pub min_index: usize,
    /// Timestep of the first maximum
    pub max_index: usize,
    /// Sum over the window (the accumulated total for precipitation)
    pub sum: f64,
}

impl SeriesStats {
    /// `None` for an empty series
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let mut stats = Self {
            min: first,
            max: first,
            min_index: 0,
            max_index: 0,
            sum: 0.0,
        };
        for (idx, &value) in values.iter().enumerate() {
            if value < stats.min {
                stats.min = value;
                stats.min_index = idx;
            }
            if value > stats.max {
                stats.max = value;
                stats.max_index = idx;
            }
            stats.sum += value;
        }
        Some(stats)
    }

    pub fn mean(&self, len: usize) -> f64 {
        if len == 0 {
            0.0
        } else {
            self.sum / len as f64
        }
    }
}

/// Per-series statistics for every series present in an [`ExtractedSeries`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    stats: BTreeMap<SeriesKind, SeriesStats>,
    warmest: Option<DateTime<Utc>>,
    coolest: Option<DateTime<Utc>>,
}

impl Summary {
    pub fn get(&self, kind: SeriesKind) -> Option<&SeriesStats> {
        self.stats.get(&kind)
    }

    /// Summarized series in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (SeriesKind, &SeriesStats)> {
        self.stats.iter().map(|(&kind, stats)| (kind, stats))
    }

    /// Time of the highest temperature
    pub fn warmest(&self) -> Option<DateTime<Utc>> {
        self.warmest
    }

    /// Time of the lowest temperature
    pub fn coolest(&self) -> Option<DateTime<Utc>> {
        self.coolest
    }

    /// Precipitation accumulated over the window
    pub fn total_precipitation(&self) -> Option<f64> {
        self.get(SeriesKind::Precipitation).map(|stats| stats.sum)
    }
}

/// Compute extrema and totals for every present series
///
/// Absent series are skipped.
pub fn summarize(series: &ExtractedSeries) -> Summary {
    let stats: BTreeMap<SeriesKind, SeriesStats> = SeriesKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let values = series.series(kind)?;
            SeriesStats::from_values(values).map(|stats| (kind, stats))
        })
        .collect();

    let times = series.times();
    let (warmest, coolest) = match stats.get(&SeriesKind::Temperature) {
        Some(temp) => (
            times.get(temp.max_index).copied(),
            times.get(temp.min_index).copied(),
        ),
        None => (None, None),
    };

    Summary {
        stats,
        warmest,
        coolest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::locate::GridCell;
    use crate::core_types::PointOfInterest;
    use crate::grid::{TimeAxis, TimeWindow};
    use approx::assert_abs_diff_eq;
    use chrono::Timelike;

    fn series() -> ExtractedSeries {
        let times = TimeAxis::from_window(&TimeWindow::default())
            .unwrap()
            .times()
            .to_vec();
        let cell = GridCell {
            lat_index: 2,
            lon_index: 2,
            lat: -15.5,
            lon: -55.5,
        };
        ExtractedSeries::new(times, PointOfInterest::default(), cell)
            .with_series(
                SeriesKind::Temperature,
                vec![31.0, 32.5, 33.1, 33.1, 30.2, 28.0, 26.4, 25.0, 25.9],
            )
            .unwrap()
            .with_series(
                SeriesKind::Precipitation,
                vec![0.0, 0.0, 1.2, 0.0, 3.4, 0.0, 0.0, 0.5, 0.0],
            )
            .unwrap()
    }

    #[test]
    fn test_stats_of_values() {
        let stats = SeriesStats::from_values(&[2.0, -1.0, 4.0, -1.0]).unwrap();
        assert_eq!((stats.min, stats.min_index), (-1.0, 1));
        assert_eq!((stats.max, stats.max_index), (4.0, 2));
        assert_abs_diff_eq!(stats.sum, 4.0);
        assert_abs_diff_eq!(stats.mean(4), 1.0);
        assert!(SeriesStats::from_values(&[]).is_none());
    }

    #[test]
    fn test_precipitation_total_is_a_sum() {
        let summary = summarize(&series());
        assert_abs_diff_eq!(summary.total_precipitation().unwrap(), 5.1, epsilon = 1e-12);
    }

    #[test]
    fn test_temperature_extreme_times() {
        let summary = summarize(&series());
        // First maximum at step 2 (17 UTC), minimum at step 7 (22 UTC)
        assert_eq!(summary.warmest().unwrap().hour(), 17);
        assert_eq!(summary.coolest().unwrap().hour(), 22);
    }

    #[test]
    fn test_absent_series_are_skipped() {
        let summary = summarize(&series());
        assert!(summary.get(SeriesKind::Pressure).is_none());
        assert!(summary.get(SeriesKind::WindSpeed).is_none());
        assert_eq!(summary.iter().count(), 2);

        let no_temp = summarize(&series().without(SeriesKind::Temperature));
        assert!(no_temp.warmest().is_none());
    }
}
