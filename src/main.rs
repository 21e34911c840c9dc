use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber;

use wavecmp::{compare::ComparisonEngine, config::Config};

#[derive(Parser)]
#[command(
    name = "wavecmp",
    version,
    about = "Render paired audio waveforms with a shared amplitude scale",
    long_about = "wavecmp pairs audio files by filename stem across two directories and renders each pair as two waveform images sharing one y-axis range, for fair visual loudness comparison."
)]
struct Cli {
    /// First source directory (scanned recursively)
    #[arg(short = 'a', long)]
    dir_a: PathBuf,

    /// Second source directory (scanned recursively)
    #[arg(short = 'b', long)]
    dir_b: PathBuf,

    /// Image root; one subdirectory per source is created underneath
    #[arg(short, long, default_value = "images")]
    out: PathBuf,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting wavecmp v{}", env!("CARGO_PKG_VERSION"));
    info!("Directory A: {:?}", cli.dir_a);
    info!("Directory B: {:?}", cli.dir_b);
    info!("Image root: {:?}", cli.out);

    // Load configuration
    let config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    config.validate()?;

    let engine = ComparisonEngine::new(config);
    let report = engine.compare(&cli.dir_a, &cli.dir_b, &cli.out).await?;

    if report.is_empty() {
        warn!("Nothing to do: no pairs were processed");
        return Ok(());
    }

    info!(
        "Rendered {} images across {} pairs ({} pairs complete, {} sides failed)",
        report.rendered_images(),
        report.pairs.len(),
        report.complete_pairs(),
        report.failed_sides()
    );
    info!("ℹ️ Each pair uses an identical y-axis amplitude scale for fair loudness comparison");

    Ok(())
}
