//! Configuration for the sampling node
//!
//! Loaded from a TOML file. Every section and key has a default, so an
//! empty file (or no file at all) yields a working three-rotation run
//! reading scans from stdin.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use laser_core::{DEFAULT_ROTATIONS, Sampler};
use laser_plot::PlotOptions;
use serde::{Deserialize, Serialize};

/// Top-level node configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NodeConfig {
    pub sampler: SamplerConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SamplerConfig {
    /// Full rotations to collect; history capacity is `360 * rotations`
    pub rotations: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            rotations: DEFAULT_ROTATIONS,
        }
    }
}

impl SamplerConfig {
    /// Sampler sized for the configured rotations.
    ///
    /// # Errors
    /// Fails when the rotation count makes the history capacity overflow.
    pub fn build(&self) -> Result<Sampler> {
        match Sampler::with_rotations(self.rotations) {
            Some(sampler) => Ok(sampler),
            None => bail!(
                "sampler rotations {} too large: history capacity overflows",
                self.rotations
            ),
        }
    }
}

/// Where scan messages come from
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// JSON scan messages, one per line
    #[default]
    Stdin,
    /// JSON scan messages popped from a Redis list
    Redis,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub redis_url: String,
    /// Queue topic; the Redis key is `scan:queue:<topic>`
    pub topic: String,
    /// Sleep between polls of an empty Redis queue
    pub poll_interval_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Stdin,
            redis_url: "redis://127.0.0.1/".to_string(),
            topic: "scan".to_string(),
            poll_interval_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// SVG file the plot is written to
    pub path: PathBuf,
    #[serde(flatten)]
    pub plot: PlotOptions,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("output/cartesian_plot.svg"),
            plot: PlotOptions::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
