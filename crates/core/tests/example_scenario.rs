//! The 5×5 Mato Grosso scenario, end to end
//!
//! Domain lat ∈ [-18, -13], lon ∈ [-58, -53], 15–23 UTC on 2021-03-06,
//! point of interest Chapada dos Guimarães (-15.46, -55.75).
//!
//! Run with: cargo test --test `example_scenario`

use approx::assert_abs_diff_eq;
use std::f64::consts::PI;
use wx_synth_core::{
    run, Domain, FieldGenerator, FieldKind, GenerationParams, PointExtractor, PointOfInterest,
    ScenarioConfig, SeriesKind, SynthError, TimeWindow,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn example_config() -> ScenarioConfig {
    ScenarioConfig {
        resolution: 5,
        ..ScenarioConfig::default()
    }
}

#[test]
fn test_field_shapes() {
    let output = run(&example_config()).unwrap();
    for field in output.fields.iter() {
        assert_eq!(field.shape(), (9, 5, 5), "{}", field.kind());
    }
    assert_eq!(output.fields.times().len(), 9);
    assert_eq!(output.fields.times().hours_of_day(), (15..=23).collect::<Vec<u32>>());
}

#[test]
fn test_base_temperature_at_first_hour() {
    let params = GenerationParams::default();
    let expected = 26.0 + 7.0 * ((15.0 - 6.0) * PI / 12.0).sin();
    assert_abs_diff_eq!(params.temperature.base_at(15), expected, epsilon = 1e-12);
    assert_abs_diff_eq!(expected, 30.95, epsilon = 0.01);
}

#[test]
fn test_no_precipitation_at_onset_hour() {
    let output = run(&example_config()).unwrap();
    let slab = output.fields.time_slice(FieldKind::Precipitation, 0);
    assert_eq!(slab.len(), 25);
    assert!(slab.iter().all(|&v| v == 0.0));
}

#[test]
fn test_precipitation_non_negative_over_large_grid() {
    let config = ScenarioConfig {
        resolution: 40,
        seed: 2021,
        ..ScenarioConfig::default()
    };
    let output = run(&config).unwrap();
    let precip = output.fields.get(FieldKind::Precipitation);
    assert!(precip.as_slice().iter().all(|&v| v >= 0.0));
    // With p up to 0.3 over 1600 cells in the late steps, some rain must fall
    assert!(output.fields.accumulated_precipitation().iter().any(|&v| v > 0.0));
}

#[test]
fn test_extracted_series_length_and_cell() {
    let output = run(&example_config()).unwrap();
    assert_eq!(output.series.len(), 9);
    for kind in SeriesKind::ALL {
        assert_eq!(output.series.series(kind).map(<[f64]>::len), Some(9), "{kind}");
    }
    let cell = output.series.cell();
    assert_eq!((cell.lat, cell.lon), (-15.5, -55.5));
}

#[test]
fn test_wind_speed_from_components() {
    let output = run(&example_config()).unwrap();
    let u = output.series.series(SeriesKind::UWind).unwrap();
    let v = output.series.series(SeriesKind::VWind).unwrap();
    let speed = output.series.series(SeriesKind::WindSpeed).unwrap();
    for t in 0..9 {
        assert_abs_diff_eq!(speed[t], (u[t].powi(2) + v[t].powi(2)).sqrt(), epsilon = 1e-9);
    }
}

#[test]
fn test_runs_are_bit_identical() {
    let a = run(&example_config()).unwrap();
    let b = run(&example_config()).unwrap();
    assert_eq!(a.fields, b.fields);
    assert_eq!(a.report.as_str(), b.report.as_str());
}

#[test]
fn test_thread_count_does_not_change_output() {
    let generate = || {
        FieldGenerator::default()
            .generate(
                &Domain::mato_grosso(),
                16,
                &TimeWindow::default(),
                &PointOfInterest::chapada_dos_guimaraes(),
                99,
            )
            .unwrap()
    };
    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(generate);
    let many = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap()
        .install(generate);
    assert_eq!(single, many);
}

#[test]
fn test_out_of_domain_extraction_fails() {
    let output = run(&example_config()).unwrap();
    let far = PointOfInterest::new(-10.0, -50.0, "Outside");
    let result = PointExtractor::new().extract(&output.fields, output.fields.grid(), &far);
    assert!(matches!(result, Err(SynthError::OutOfDomain { .. })));
}

#[test]
fn test_summary_matches_series() {
    let output = run(&example_config()).unwrap();
    let temp = output.series.series(SeriesKind::Temperature).unwrap();
    let stats = output.summary.get(SeriesKind::Temperature).unwrap();
    assert_eq!(stats.max, temp.iter().copied().fold(f64::MIN, f64::max));
    assert_eq!(stats.min, temp.iter().copied().fold(f64::MAX, f64::min));
    assert_eq!(output.summary.warmest(), Some(output.series.times()[stats.max_index]));

    let precip = output.series.series(SeriesKind::Precipitation).unwrap();
    assert_abs_diff_eq!(
        output.summary.total_precipitation().unwrap(),
        precip.iter().sum::<f64>(),
        epsilon = 1e-9
    );
}
