//! Fixed-format text report
//!
//! Layout:
//!
//! ```text
//! ============================================================
//!   <title>
//!   Window: 2021-03-06 15:00 – 23:00 UTC (9 h)
//!   Resolution: 5×5 points
//! ============================================================
//! Location: <label> (<lat>°, <lon>°)
//! Temperature: <min> to <max> °C
//! ...
//! ------------------------------------------------------------
//! Hour  | Temp(°C) | Wind(m/s) | Press(hPa) | Precip(mm)
//! ------------------------------------------------------------
//! 15:00 |     31.2 |       3.4 |     1011.9 |        0.0
//! ============================================================
//! ```
//!
//! Series missing from the input drop out of both the summary lines and the
//! table. [`parse_table`] reads the table back.

use crate::analysis::series::{ExtractedSeries, SeriesKind};
use crate::analysis::summary::Summary;
use crate::error::{SynthError, SynthResult};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const RULE_WIDTH: usize = 60;
const HOUR_WIDTH: usize = 5;

/// Table columns after the hour, in display order: `(series, header, width)`
const COLUMNS: [(SeriesKind, &str, usize); 4] = [
    (SeriesKind::Temperature, "Temp(°C)", 8),
    (SeriesKind::WindSpeed, "Wind(m/s)", 9),
    (SeriesKind::Pressure, "Press(hPa)", 10),
    (SeriesKind::Precipitation, "Precip(mm)", 10),
];

/// Metadata for the title block that the series itself does not carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub title: String,
    /// Grid points per axis
    pub resolution: usize,
}

/// One table row; `None` for a column that was not rendered
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// `HH:MM` in UTC
    pub hour: String,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub pressure: Option<f64>,
    pub precipitation: Option<f64>,
}

impl ReportRow {
    fn empty(hour: String) -> Self {
        Self {
            hour,
            temperature: None,
            wind_speed: None,
            pressure: None,
            precipitation: None,
        }
    }

    pub fn value(&self, kind: SeriesKind) -> Option<f64> {
        match kind {
            SeriesKind::Temperature => self.temperature,
            SeriesKind::WindSpeed => self.wind_speed,
            SeriesKind::Pressure => self.pressure,
            SeriesKind::Precipitation => self.precipitation,
            _ => None,
        }
    }

    fn set(&mut self, kind: SeriesKind, value: f64) {
        match kind {
            SeriesKind::Temperature => self.temperature = Some(value),
            SeriesKind::WindSpeed => self.wind_speed = Some(value),
            SeriesKind::Pressure => self.pressure = Some(value),
            SeriesKind::Precipitation => self.precipitation = Some(value),
            _ => {}
        }
    }
}

/// A rendered report: its rows plus the full text
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    rows: Vec<ReportRow>,
    text: String,
}

impl Report {
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Write the report text to `path`; the parent directory must exist
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::ReportWrite`] if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SynthResult<()> {
        let path = path.as_ref();
        fs::write(path, &self.text)
            .map_err(|e| SynthError::ReportWrite(format!("{}: {e}", path.display())))?;
        info!("Report written to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn window_line(series: &ExtractedSeries) -> String {
    match (series.times().first(), series.times().last()) {
        (Some(first), Some(last)) => format!(
            "Window: {} – {} UTC ({} h)",
            first.format("%Y-%m-%d %H:%M"),
            last.format("%H:%M"),
            series.len()
        ),
        _ => "Window: empty".to_string(),
    }
}

fn summary_lines(summary: &Summary) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(temp) = summary.get(SeriesKind::Temperature) {
        lines.push(format!("Temperature: {:.1} to {:.1} °C", temp.min, temp.max));
        if let (Some(warmest), Some(coolest)) = (summary.warmest(), summary.coolest()) {
            lines.push(format!("Warmest: {} UTC", warmest.format("%H:%M")));
            lines.push(format!("Coolest: {} UTC", coolest.format("%H:%M")));
        }
    }
    if let Some(wind) = summary.get(SeriesKind::WindSpeed) {
        lines.push(format!("Wind: {:.1} to {:.1} m/s", wind.min, wind.max));
    }
    if let Some(pressure) = summary.get(SeriesKind::Pressure) {
        lines.push(format!(
            "Pressure: {:.1} to {:.1} hPa",
            pressure.min, pressure.max
        ));
    }
    if let Some(total) = summary.total_precipitation() {
        lines.push(format!("Total precipitation: {total:.1} mm"));
    }
    lines
}

/// Render `series` and its `summary` as the fixed-format report
pub fn render(series: &ExtractedSeries, summary: &Summary, header: &ReportHeader) -> Report {
    let columns: Vec<(SeriesKind, &str, usize)> = COLUMNS
        .into_iter()
        .filter(|(kind, _, _)| series.has(*kind))
        .collect();
    let skipped: Vec<SeriesKind> = COLUMNS
        .iter()
        .map(|(kind, _, _)| *kind)
        .filter(|kind| !series.has(*kind))
        .collect();
    if !skipped.is_empty() {
        warn!(
            "Report for '{}' skips missing series: {:?}",
            series.point().label,
            skipped
        );
    }

    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let point = series.point();
    let mut lines = vec![
        heavy.clone(),
        format!("  {}", header.title),
        format!("  {}", window_line(series)),
        format!(
            "  Resolution: {}×{} points",
            header.resolution, header.resolution
        ),
        heavy.clone(),
        format!(
            "Location: {} ({:.2}°, {:.2}°)",
            point.label, point.lat, point.lon
        ),
    ];
    lines.extend(summary_lines(summary));
    lines.push(light.clone());

    let mut heading = String::from("Hour ");
    for (_, label, _) in &columns {
        heading.push_str(" | ");
        heading.push_str(label);
    }
    lines.push(heading);
    lines.push(light);

    let mut rows = Vec::with_capacity(series.len());
    for (t, time) in series.times().iter().enumerate() {
        let mut row = ReportRow::empty(time.format("%H:%M").to_string());
        let mut line = row.hour.clone();
        for &(kind, _, width) in &columns {
            if let Some(value) = series.series(kind).and_then(|values| values.get(t)) {
                line.push_str(&format!(" | {value:>width$.1}"));
                row.set(kind, *value);
            }
        }
        lines.push(line);
        rows.push(row);
    }
    lines.push(heavy);

    let mut text = lines.join("\n");
    text.push('\n');
    Report { rows, text }
}

fn parse_error(line: usize, reason: impl Into<String>) -> SynthError {
    SynthError::ReportParse {
        line,
        reason: reason.into(),
    }
}

fn column_for(label: &str) -> Option<SeriesKind> {
    COLUMNS
        .iter()
        .find(|(_, header, _)| *header == label)
        .map(|(kind, _, _)| *kind)
}

fn is_hour_label(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == HOUR_WIDTH
        && bytes[2] == b':'
        && bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit)
}

/// Read the table of a rendered report back into rows
///
/// Values come back at printed precision (one decimal).
///
/// # Errors
///
/// Returns [`SynthError::ReportParse`] with a 1-based line number when the
/// table heading is missing, a heading column is unknown, or a row is
/// malformed.
pub fn parse_table(text: &str) -> SynthResult<Vec<ReportRow>> {
    let mut lines = text.lines().enumerate().map(|(idx, line)| (idx + 1, line));

    let (heading_no, heading) = lines
        .by_ref()
        .find(|(_, line)| line.starts_with("Hour"))
        .ok_or_else(|| parse_error(text.lines().count(), "table heading not found"))?;
    let columns = heading
        .split('|')
        .skip(1)
        .map(|label| {
            let label = label.trim();
            column_for(label)
                .ok_or_else(|| parse_error(heading_no, format!("unknown column `{label}`")))
        })
        .collect::<SynthResult<Vec<SeriesKind>>>()?;

    let mut rows = Vec::new();
    for (line_no, line) in lines {
        if line.starts_with('-') {
            continue;
        }
        if line.starts_with('=') || line.trim().is_empty() {
            break;
        }

        let mut cells = line.split('|').map(str::trim);
        let hour = cells.next().unwrap_or_default();
        if !is_hour_label(hour) {
            return Err(parse_error(line_no, format!("bad hour `{hour}`")));
        }
        let mut row = ReportRow::empty(hour.to_string());
        let values: Vec<&str> = cells.collect();
        if values.len() != columns.len() {
            return Err(parse_error(
                line_no,
                format!("expected {} values, found {}", columns.len(), values.len()),
            ));
        }
        for (&kind, cell) in columns.iter().zip(values) {
            let value: f64 = cell
                .parse()
                .map_err(|_| parse_error(line_no, format!("bad {kind} value `{cell}`")))?;
            row.set(kind, value);
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::locate::GridCell;
    use crate::analysis::summary::summarize;
    use crate::core_types::PointOfInterest;
    use crate::grid::{TimeAxis, TimeWindow};

    fn header() -> ReportHeader {
        ReportHeader {
            title: "Synthetic weather - Chapada dos Guimarães".to_string(),
            resolution: 5,
        }
    }

    fn full_series() -> ExtractedSeries {
        let window = TimeWindow::new(TimeWindow::default().start, 3, 5);
        let times = TimeAxis::from_window(&window).unwrap().times().to_vec();
        let cell = GridCell {
            lat_index: 2,
            lon_index: 2,
            lat: -15.5,
            lon: -55.5,
        };
        ExtractedSeries::new(times, PointOfInterest::default(), cell)
            .with_series(SeriesKind::Temperature, vec![31.94, 32.66, 33.08])
            .unwrap()
            .with_series(SeriesKind::UWind, vec![-3.0, -2.0, 0.0])
            .unwrap()
            .with_series(SeriesKind::VWind, vec![4.0, 0.0, -1.5])
            .unwrap()
            .with_series(SeriesKind::Pressure, vec![1012.27, 1013.0, 1011.44])
            .unwrap()
            .with_series(SeriesKind::Precipitation, vec![0.0, 0.0, 2.36])
            .unwrap()
            .with_derived_wind()
    }

    #[test]
    fn test_render_layout() {
        let series = full_series();
        let report = render(&series, &summarize(&series), &header());
        let lines: Vec<&str> = report.as_str().lines().collect();

        assert_eq!(lines[0], "=".repeat(60));
        assert_eq!(lines[2], "  Window: 2021-03-06 15:00 – 17:00 UTC (3 h)");
        assert_eq!(lines[3], "  Resolution: 5×5 points");
        assert_eq!(lines[5], "Location: Chapada dos Guimarães (-15.46°, -55.75°)");
        assert_eq!(lines[6], "Temperature: 31.9 to 33.1 °C");
        assert_eq!(lines[7], "Warmest: 17:00 UTC");
        assert_eq!(lines[8], "Coolest: 15:00 UTC");
        assert_eq!(lines[9], "Wind: 1.5 to 5.0 m/s");
        assert_eq!(lines[10], "Pressure: 1011.4 to 1013.0 hPa");
        assert_eq!(lines[11], "Total precipitation: 2.4 mm");
        assert_eq!(
            lines[13],
            "Hour  | Temp(°C) | Wind(m/s) | Press(hPa) | Precip(mm)"
        );
        assert_eq!(
            lines[15],
            "15:00 |     31.9 |       5.0 |     1012.3 |        0.0"
        );
        assert_eq!(lines.last().copied(), Some("=".repeat(60).as_str()));
        assert_eq!(report.rows().len(), 3);
    }

    #[test]
    fn test_round_trip_to_printed_precision() {
        let series = full_series();
        let report = render(&series, &summarize(&series), &header());
        let parsed = parse_table(report.as_str()).unwrap();

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2].hour, "17:00");
        let temp = series.series(SeriesKind::Temperature).unwrap();
        let precip = series.series(SeriesKind::Precipitation).unwrap();
        for (t, row) in parsed.iter().enumerate() {
            assert!((row.temperature.unwrap() - temp[t]).abs() <= 0.05 + 1e-9);
            assert!((row.precipitation.unwrap() - precip[t]).abs() <= 0.05 + 1e-9);
        }
        let speed = series.series(SeriesKind::WindSpeed).unwrap();
        let pressure = series.series(SeriesKind::Pressure).unwrap();
        for (t, row) in parsed.iter().enumerate() {
            assert!((row.wind_speed.unwrap() - speed[t]).abs() <= 0.05 + 1e-9);
            assert!((row.pressure.unwrap() - pressure[t]).abs() <= 0.05 + 1e-9);
        }
    }

    #[test]
    fn test_missing_series_drop_out() {
        let series = full_series()
            .without(SeriesKind::Pressure)
            .without(SeriesKind::Temperature);
        let report = render(&series, &summarize(&series), &header());
        let text = report.as_str();

        assert!(!text.contains("Pressure:"));
        assert!(!text.contains("Temperature:"));
        assert!(!text.contains("Warmest"));
        assert!(text.contains("Hour  | Wind(m/s) | Precip(mm)\n"));

        let parsed = parse_table(text).unwrap();
        assert_eq!(parsed.len(), 3);
        assert!(parsed.iter().all(|row| row.pressure.is_none() && row.temperature.is_none()));
        assert_eq!(parsed[0].wind_speed, Some(5.0));
    }

    #[test]
    fn test_parse_reports_bad_rows() {
        let text = "Hour  | Temp(°C)\n-----\n15:00 |     abc\n";
        assert_eq!(
            parse_table(text).unwrap_err(),
            SynthError::ReportParse {
                line: 3,
                reason: "bad temperature value `abc`".to_string()
            }
        );
        assert!(parse_table("no table here\n").is_err());
        assert!(parse_table("Hour  | Humidity\n").is_err());
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let series = full_series();
        let report = render(&series, &summarize(&series), &header());
        let path = std::env::temp_dir()
            .join("wx-synth-no-such-dir")
            .join("nested")
            .join("report.txt");
        assert!(matches!(report.save(path), Err(SynthError::ReportWrite(_))));
    }
}
