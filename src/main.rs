//! Quadrant Tracker CLI
//!
//! Runs the tracking pipeline over a raw BGR24 video, writing an annotated
//! raw video and the quadrant event log. Decode the input first, e.g.
//! `ffmpeg -i ball.mp4 -f rawvideo -pix_fmt bgr24 ball.bgr`.

use clap::Parser;
use quadrant_tracker::{
    capture::{FileConfig, RawVideoSource},
    metrics::{MetricsRegistry, MetricsSnapshot},
    pipeline::{self, RawVideoSink, RunSummary},
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "quadrant-tracker", version, about = "Log quadrant entry/exit events of colored balls in a video")]
struct Args {
    /// Raw BGR24 input video.
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the annotated raw BGR24 video.
    #[arg(short = 'o', long)]
    output_video: PathBuf,

    /// Where to write the event log.
    #[arg(short, long)]
    events: PathBuf,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frame width in pixels (overrides the config file).
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels (overrides the config file).
    #[arg(long)]
    height: Option<u32>,

    /// Frames per second (overrides the config file).
    #[arg(long)]
    fps: Option<f64>,

    /// Write Prometheus metrics for the run to this file.
    #[arg(long)]
    metrics_out: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    info!("Quadrant Tracker v{}", quadrant_tracker::VERSION);

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        if let Err(e) = ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed)) {
            warn!("Could not install Ctrl-C handler: {}", e);
        }
    }

    let mut source = RawVideoSource::new(&args.input, config.stream.clone());
    let mut sink = RawVideoSink::new(&args.output_video);

    let summary = match pipeline::run(&mut source, &mut sink, &config.detection, &stop) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if summary.interrupted {
        warn!("Run interrupted; saving events for frames processed so far");
    }

    if let Err(e) = summary.log.save(&args.events) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Some(path) = &args.metrics_out {
        if let Err(e) = write_metrics(&summary, path) {
            warn!("Failed to write metrics: {}", e);
        }
    }

    info!(
        "Processed {} frames: {} events ({} entries, {} exits)",
        summary.stats.frames,
        summary.log.len(),
        summary.stats.entries,
        summary.stats.exits
    );
    println!("Processed video saved to {}", args.output_video.display());
    println!("Event log saved to {}", args.events.display());
}

/// Builds the effective configuration: file (or defaults), then CLI overrides.
fn load_config(args: &Args) -> Result<FileConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    if let Some(width) = args.width {
        config.stream.width = width;
    }
    if let Some(height) = args.height {
        config.stream.height = height;
    }
    if let Some(fps) = args.fps {
        config.stream.fps = fps;
    }
    config.validate()?;
    Ok(config)
}

fn write_metrics(summary: &RunSummary, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let registry = MetricsRegistry::new()?;
    registry.update(&MetricsSnapshot::from(summary.stats));
    std::fs::write(path, registry.encode()?)?;
    info!("Metrics written to {}", path.display());
    Ok(())
}
