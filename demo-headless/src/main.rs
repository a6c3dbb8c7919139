use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wx_synth_core::{run, FieldKind, ScenarioConfig, SeriesKind};

/// Synthetic weather demo: generate fields, sample the point of interest,
/// write the text report
#[derive(Parser, Debug)]
#[command(name = "wx-synth-demo")]
#[command(about = "Synthetic weather fields and point report", long_about = None)]
struct Args {
    /// Scenario JSON file (built-in Mato Grosso scenario when omitted)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Random seed, overrides the scenario
    #[arg(long)]
    seed: Option<u64>,

    /// Grid points per axis, overrides the scenario
    #[arg(short, long)]
    resolution: Option<usize>,

    /// Report output path; the directory must already exist
    #[arg(short, long, default_value = "weather_report.txt")]
    output: PathBuf,

    /// Write the default scenario JSON to this path and exit
    #[arg(long)]
    emit_default: Option<PathBuf>,

    /// Also print the full report to stdout
    #[arg(short, long)]
    print_report: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Some(path) = &args.emit_default {
        ScenarioConfig::default()
            .save(path)
            .with_context(|| format!("writing default scenario to {}", path.display()))?;
        println!("Default scenario written to {}", path.display());
        return Ok(());
    }

    let mut config = match &args.scenario {
        Some(path) => ScenarioConfig::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    info!(
        "Scenario: {}x{} grid, {} hourly steps, seed={}",
        config.resolution,
        config.resolution,
        config.window.len(),
        config.seed
    );

    let output = run(&config).context("running scenario")?;

    println!("=== Synthetic Weather Demo ===\n");
    let (n_times, n_lat, n_lon) = output.fields.shape();
    println!("Fields: {n_times} steps over a {n_lat}x{n_lon} grid");
    for field in output.fields.iter() {
        if let Some((lo, hi)) = field.min_max() {
            println!(
                "  {:<14} {:>8.1} to {:>8.1} {}",
                field.kind().name(),
                lo,
                hi,
                field.kind().unit()
            );
        }
    }
    let accumulated = output.fields.accumulated_precipitation();
    let wettest = accumulated.iter().copied().fold(0.0_f64, f64::max);
    let rainy_cells = accumulated.iter().filter(|&&v| v > 0.0).count();
    println!(
        "Accumulated {}: max {:.1} {} ({} of {} cells wet)\n",
        FieldKind::Precipitation,
        wettest,
        FieldKind::Precipitation.unit(),
        rainy_cells,
        accumulated.len()
    );

    let cell = output.series.cell();
    println!(
        "{} -> cell ({}, {}) at ({:.3}, {:.3})",
        config.point.label, cell.lat_index, cell.lon_index, cell.lat, cell.lon
    );
    for (kind, stats) in output.summary.iter() {
        println!(
            "  {:<14} min {:>8.1}  max {:>8.1}  {}",
            kind.name(),
            stats.min,
            stats.max,
            kind.unit()
        );
    }
    if let Some(total) = output.summary.total_precipitation() {
        println!("  total precipitation {total:.1} mm");
    }
    if let (Some(u), Some(v)) = (
        output.summary.get(SeriesKind::UWind),
        output.summary.get(SeriesKind::VWind),
    ) {
        let steps = output.series.len();
        let (mean_u, mean_v) = (u.mean(steps), v.mean(steps));
        println!(
            "  mean wind vector ({mean_u:.1}, {mean_v:.1}) m/s, direction {:.0}°",
            mean_v.atan2(mean_u).to_degrees()
        );
    }

    output
        .report
        .save(&args.output)
        .with_context(|| format!("writing report to {}", args.output.display()))?;
    println!("\nReport written to {}", args.output.display());

    if args.print_report {
        println!("\n{}", output.report);
    }

    Ok(())
}
