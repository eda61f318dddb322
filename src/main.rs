use clap::Parser;
use hinge_stats::config::{LoggingSettings, Settings};
use hinge_stats::core::{Analyzer, PipelineError};
use hinge_stats::render::{self, ChartInput};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Like and match statistics for a Hinge data export
#[derive(Debug, Parser)]
#[command(name = "hinge-stats", version, about)]
struct Cli {
    /// Path to matches.json (overrides HINGE__EXPORT__PATH and the config file)
    path: Option<PathBuf>,

    /// Extra configuration file layered over config/default.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the SVG charts
    #[arg(long, value_name = "FILE")]
    chart: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    no_chart: bool,

    /// Skip and count malformed timestamps instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match cli.config.as_deref() {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error [config]: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging);

    match execute(cli, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run failed during {} stage", e.stage());
            eprintln!("error [{}]: {}", e.stage(), e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli, mut settings: Settings) -> Result<(), PipelineError> {
    // Command line flags win over config and environment
    if let Some(path) = cli.path {
        settings.export.path = Some(path);
    }
    if let Some(chart) = cli.chart {
        settings.chart.output = chart;
    }
    if cli.no_chart {
        settings.chart.enabled = false;
    }
    if cli.skip_malformed {
        settings.timestamps.skip_malformed = true;
    }

    let path = settings.export.path.clone().ok_or_else(|| {
        config::ConfigError::Message(
            "no export path given; pass PATH or set HINGE__EXPORT__PATH".to_string(),
        )
    })?;

    info!("Analyzing export {}", path.display());

    let analyzer = Analyzer::new(settings.timestamps.policy());
    let report = analyzer.run(&path)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        render::write_json(&report, &mut out)?;
    } else {
        render::write_summary(&report, &mut out)?;
    }

    if settings.chart.enabled {
        render::render_svg_file(
            &ChartInput::from_report(&report),
            &settings.chart.output,
            (settings.chart.width, settings.chart.height),
        )?;
    }

    Ok(())
}

fn init_logging(logging: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    // RUST_LOG takes precedence when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}
