//! # Laser Node
//!
//! Drives a `Sampler` from a scan source until it turns terminal, then
//! converts the collected history to Cartesian points and saves the plot.
//! Stopping delivery and producing output are decided here, not in the sampler.

pub mod config;
pub mod source;

use std::io;
use std::time::Duration;

use anyhow::Result;
use laser_core::{Sampler, SamplerState};
use laser_transform::{CartesianPoint, convert, split_axes};
use log::{info, warn};

use crate::config::{NodeConfig, SourceKind};
use crate::source::{JsonLinesSource, RedisSource, ScanSource};

/// Outcome of one sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Scan messages pulled from the source
    pub delivered: usize,
    /// Samples in the final history
    pub samples: usize,
    /// Whether the sampler reached its capacity
    pub terminal: bool,
}

/// Feed scans to `sampler` until it is terminal or the source runs dry.
///
/// # Returns
/// The number of scan messages pulled from the source.
pub fn collect<S: ScanSource + ?Sized>(source: &mut S, sampler: &mut Sampler) -> Result<usize> {
    let mut delivered = 0;
    while !sampler.is_terminal() {
        let Some(scan) = source.next_scan()? else {
            break;
        };
        delivered += 1;
        if sampler.ingest(&scan) == SamplerState::Terminal {
            break;
        }
    }
    Ok(delivered)
}

/// Collect from `source`, convert, and save the plot described by `config`.
pub fn run_with_source<S: ScanSource + ?Sized>(
    config: &NodeConfig,
    source: &mut S,
) -> Result<(RunSummary, Vec<CartesianPoint>)> {
    let mut sampler = config.sampler.build()?;
    info!(
        "collecting {} samples ({} rotations)",
        sampler.capacity(),
        config.sampler.rotations
    );

    let delivered = collect(source, &mut sampler)?;
    let terminal = sampler.is_terminal();
    if !terminal {
        warn!(
            "scan source ended after {} of {} samples; plotting partial history",
            sampler.len(),
            sampler.capacity()
        );
    }

    let history = sampler.into_history();
    let points = convert(history.as_slice());
    let (xs, ys) = split_axes(&points);
    laser_plot::save(&config.output.path, &xs, &ys, &config.output.plot)?;

    let summary = RunSummary {
        delivered,
        samples: history.len(),
        terminal,
    };
    Ok((summary, points))
}

/// Run with the source named in `config`.
pub fn run(config: &NodeConfig) -> Result<RunSummary> {
    let (summary, _) = match config.source.kind {
        SourceKind::Stdin => {
            let stdin = io::stdin();
            let mut source = JsonLinesSource::new(stdin.lock());
            run_with_source(config, &mut source)?
        }
        SourceKind::Redis => {
            let mut source = RedisSource::connect(
                &config.source.redis_url,
                &config.source.topic,
                Duration::from_millis(config.source.poll_interval_ms),
            )?;
            run_with_source(config, &mut source)?
        }
    };
    Ok(summary)
}
