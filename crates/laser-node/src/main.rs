//! Sampling node: collects laser readings over several rotations and saves
//! them as a Cartesian scatter plot.
//!
//! Usage:
//!   laser-node --config laser-node.toml < scans.jsonl
//!   laser-node --source redis --output output/front.svg

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use laser_node::config::{NodeConfig, SourceKind};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "laser-node.toml")]
    config: PathBuf,

    /// Scan source, overrides the config file
    #[arg(short, long, value_enum)]
    source: Option<SourceKind>,

    /// Output SVG path, overrides the config file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Full rotations to collect, overrides the config file
    #[arg(short, long)]
    rotations: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_found = args.config.exists();
    let mut config = if config_found {
        NodeConfig::from_file(&args.config)?
    } else {
        NodeConfig::default()
    };
    if let Some(source) = args.source {
        config.source.kind = source;
    }
    if let Some(output) = args.output {
        config.output.path = output;
    }
    if let Some(rotations) = args.rotations {
        config.sampler.rotations = rotations;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if !config_found {
        warn!(
            "config not found at {}, using defaults",
            args.config.display()
        );
    }

    let summary = laser_node::run(&config)?;
    info!(
        "done: {} scans delivered, {} samples plotted to {}",
        summary.delivered,
        summary.samples,
        config.output.path.display()
    );
    Ok(())
}
