//! Hourly time axis for the simulation window

use crate::error::{SynthError, SynthResult};
use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Simulation window as an hour-offset range from a model cycle time
///
/// The default is the 2021-03-06 12z cycle with offsets 3..=11, i.e. nine
/// hourly steps from 15:00 to 23:00 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Cycle (initialization) time
    pub start: DateTime<Utc>,
    /// First offset in hours from `start`
    pub offset_hours_start: i64,
    /// Last offset in hours from `start`, inclusive
    pub offset_hours_end: i64,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, offset_hours_start: i64, offset_hours_end: i64) -> Self {
        Self {
            start,
            offset_hours_start,
            offset_hours_end,
        }
    }

    /// Number of hourly steps, or zero for an inverted window or one whose
    /// step count does not fit in `usize`
    pub fn len(&self) -> usize {
        if self.offset_hours_end < self.offset_hours_start {
            return 0;
        }
        self.offset_hours_end
            .checked_sub(self.offset_hours_start)
            .and_then(|span| span.checked_add(1))
            .and_then(|steps| usize::try_from(steps).ok())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Timestamp `offset` hours after `start`, `None` outside chrono's range
    pub fn at(&self, offset: i64) -> Option<DateTime<Utc>> {
        Duration::try_hours(offset).and_then(|delta| self.start.checked_add_signed(delta))
    }

    /// # Errors
    ///
    /// Returns [`SynthError::InvalidTimeWindow`] if the window holds no steps
    /// or either end falls outside the representable date range.
    pub fn validate(&self) -> SynthResult<()> {
        if self.is_empty()
            || self.at(self.offset_hours_start).is_none()
            || self.at(self.offset_hours_end).is_none()
        {
            return Err(self.invalid());
        }
        Ok(())
    }

    fn invalid(&self) -> SynthError {
        SynthError::InvalidTimeWindow {
            origin: self.start,
            start: self.offset_hours_start,
            end: self.offset_hours_end,
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2021, 3, 6, 12, 0, 0)
                .single()
                .unwrap_or_default(),
            offset_hours_start: 3,
            offset_hours_end: 11,
        }
    }
}

/// Strictly increasing timestamps at a fixed one-hour spacing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeAxis {
    times: Vec<DateTime<Utc>>,
}

impl TimeAxis {
    /// Expand a window into its hourly timestamps
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidTimeWindow`] for an empty or inverted
    /// window, or one reaching past the representable date range.
    pub fn from_window(window: &TimeWindow) -> SynthResult<Self> {
        window.validate()?;
        let times = (window.offset_hours_start..=window.offset_hours_end)
            .map(|offset| window.at(offset))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| window.invalid())?;
        Ok(Self { times })
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn first(&self) -> Option<DateTime<Utc>> {
        self.times.first().copied()
    }

    pub fn last(&self) -> Option<DateTime<Utc>> {
        self.times.last().copied()
    }

    /// Hour of day (UTC) of every step, the input to all diurnal models
    pub fn hours_of_day(&self) -> Vec<u32> {
        self.times.iter().map(Timelike::hour).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_15z_to_23z() {
        let axis = TimeAxis::from_window(&TimeWindow::default()).unwrap();
        assert_eq!(axis.len(), 9);
        assert_eq!(axis.hours_of_day(), vec![15, 16, 17, 18, 19, 20, 21, 22, 23]);
        for pair in axis.times().windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::hours(1));
        }
    }

    #[test]
    fn test_single_step_window() {
        let start = Utc.with_ymd_and_hms(2021, 3, 6, 12, 0, 0).unwrap();
        let axis = TimeAxis::from_window(&TimeWindow::new(start, 0, 0)).unwrap();
        assert_eq!(axis.len(), 1);
        assert_eq!(axis.first(), Some(start));
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let start = Utc.with_ymd_and_hms(2021, 3, 6, 12, 0, 0).unwrap();
        let window = TimeWindow::new(start, 5, 4);
        assert!(window.is_empty());
        assert!(matches!(
            TimeAxis::from_window(&window),
            Err(SynthError::InvalidTimeWindow { start: 5, end: 4, .. })
        ));
    }

    #[test]
    fn test_window_wraps_past_midnight() {
        let start = Utc.with_ymd_and_hms(2021, 3, 6, 12, 0, 0).unwrap();
        let axis = TimeAxis::from_window(&TimeWindow::new(start, 10, 14)).unwrap();
        assert_eq!(axis.hours_of_day(), vec![22, 23, 0, 1, 2]);
    }

    #[test]
    fn test_overflowing_offsets_are_rejected() {
        let start = Utc.with_ymd_and_hms(2021, 3, 6, 12, 0, 0).unwrap();
        let window = TimeWindow::new(start, i64::MIN, i64::MAX);
        assert_eq!(window.len(), 0);
        assert!(matches!(
            window.validate(),
            Err(SynthError::InvalidTimeWindow { .. })
        ));
        assert!(TimeAxis::from_window(&window).is_err());
    }

    #[test]
    fn test_offsets_past_date_range_are_rejected() {
        let start = Utc.with_ymd_and_hms(2021, 3, 6, 12, 0, 0).unwrap();
        let window = TimeWindow::new(start, 4_000_000_000_000_000, 4_000_000_000_000_000);
        assert_eq!(window.len(), 1);
        assert!(window.at(4_000_000_000_000_000).is_none());
        assert!(matches!(
            TimeAxis::from_window(&window),
            Err(SynthError::InvalidTimeWindow { .. })
        ));

        // Representable as a duration, but past year 262143
        let window = TimeWindow::new(start, 0, 2_000_000_000_000);
        assert!(window.validate().is_err());
    }
}
