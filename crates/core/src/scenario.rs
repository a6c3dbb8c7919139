//! End-to-end run: generate, extract, summarize, render

use crate::analysis::{
    render, summarize, ExtractedSeries, PointExtractor, Report, ReportHeader, Summary,
};
use crate::config::ScenarioConfig;
use crate::core_types::FieldSet;
use crate::error::SynthResult;
use crate::weather::FieldGenerator;
use tracing::info;

/// Everything a run produces
///
/// `fields` goes to rendering collaborators; `report` is the text artifact.
#[derive(Debug, Clone)]
pub struct ScenarioOutput {
    pub fields: FieldSet,
    pub series: ExtractedSeries,
    pub summary: Summary,
    pub report: Report,
}

/// Run `config` through the whole pipeline
///
/// # Errors
///
/// Returns the first validation, generation or extraction error.
pub fn run(config: &ScenarioConfig) -> SynthResult<ScenarioOutput> {
    config.validate()?;
    info!(
        "Running scenario '{}' at '{}' ({:.2}, {:.2})",
        config.title, config.point.label, config.point.lat, config.point.lon
    );

    let fields = FieldGenerator::new(config.params.clone()).generate(
        &config.domain,
        config.resolution,
        &config.window,
        &config.point,
        config.seed,
    )?;
    let series = PointExtractor::new().extract(&fields, fields.grid(), &config.point)?;
    let summary = summarize(&series);
    let header = ReportHeader {
        title: config.title.clone(),
        resolution: config.resolution,
    };
    let report = render(&series, &summary, &header);

    Ok(ScenarioOutput {
        fields,
        series,
        summary,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SeriesKind;

    #[test]
    fn test_run_default_scenario_at_low_resolution() {
        let config = ScenarioConfig {
            resolution: 10,
            ..ScenarioConfig::default()
        };
        let output = run(&config).unwrap();
        assert_eq!(output.fields.shape(), (9, 10, 10));
        assert_eq!(output.series.len(), 9);
        assert!(output.summary.get(SeriesKind::Temperature).is_some());
        assert_eq!(output.report.rows().len(), 9);
        assert!(output.report.as_str().contains("Resolution: 10×10 points"));
    }

    #[test]
    fn test_invalid_config_fails_before_generation() {
        let config = ScenarioConfig {
            resolution: 0,
            ..ScenarioConfig::default()
        };
        assert!(run(&config).is_err());
    }
}
