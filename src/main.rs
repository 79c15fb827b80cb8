use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};
use quakeswarm::core::config::Config;
use quakeswarm::feed::{EventSource, FeedLevel, FeedPeriod, FileSource, HttpFeed};
use quakeswarm::report::{self, ReportFormat};
use quakeswarm::swarm::detect_swarms;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about = "Quakeswarm - find earthquake swarms in a seismic event feed")]
struct Cli {
    /// Path to config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Debug mode
    #[clap(short, long)]
    debug: bool,

    /// Read events from a GeoJSON file instead of the network feed
    #[clap(short, long, conflicts_with_all = ["period", "level"])]
    input: Option<PathBuf>,

    /// USGS summary feed period (overrides the configured feed URL)
    #[clap(long, value_enum)]
    period: Option<FeedPeriod>,

    /// USGS summary feed magnitude level (overrides the configured feed URL)
    #[clap(long, value_enum)]
    level: Option<FeedLevel>,

    /// Search radius in kilometers
    #[clap(long)]
    search_distance: Option<f64>,

    /// Minimum number of events in a reported swarm
    #[clap(long)]
    min_swarm_size: Option<usize>,

    /// Relaxation passes allowed per swarm
    #[clap(long)]
    max_iterations: Option<usize>,

    /// Report format
    #[clap(short, long, value_enum)]
    format: Option<ReportFormat>,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger
    let log_level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .init();

    // Load configuration, then let flags override it
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(distance) = cli.search_distance {
        config.clustering.search_distance_km = distance;
    }
    if let Some(size) = cli.min_swarm_size {
        config.clustering.min_swarm_size = size;
    }
    if let Some(iterations) = cli.max_iterations {
        config.clustering.max_iterations = iterations;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.period.is_some() || cli.level.is_some() {
        let level = cli.level.unwrap_or_default();
        config.feed.url = level.url(cli.period.unwrap_or_default());
    }

    let source: Box<dyn EventSource> = match &cli.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpFeed::from_config(&config.feed)?),
    };

    info!("Starting Quakeswarm");
    let output = detect_swarms(source.as_ref(), &config.clustering)?;

    let rendered = report::render(&output, config.output.format, config.output.precision)?;
    println!("{}", rendered);

    Ok(())
}
