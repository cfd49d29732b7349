use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use slice2geo::{PipelineConfig, RasterSource, RunBatch};

/// Convert wrist scan slices into gmsh geometry files
#[derive(Parser, Debug)]
#[command(name = "slice2geo")]
#[command(about = "Extract bone and skin contours from scan slices and write gmsh .geo files", long_about = None)]
struct Args {
    /// Directory of slice images
    #[arg(short, long)]
    input: PathBuf,

    /// Directory for the generated .geo files
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// TOML configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Worker threads (defaults to one per core)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("configuring worker threads")?;
    }

    let source = RasterSource::from_config(&config);
    let report = RunBatch::new(&source, &config)
        .execute(&args.input, &args.output)
        .with_context(|| format!("processing {}", args.input.display()))?;

    for (path, err) in &report.failed {
        eprintln!("failed: {}: {err}", path.display());
    }
    println!(
        "{} slices: {} written to {}, {} skipped, {} failed",
        report.total(),
        report.written.len(),
        args.output.display(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(())
}
