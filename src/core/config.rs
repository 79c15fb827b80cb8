use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::core::error::SwarmError;
use crate::feed::usgs::{FeedLevel, FeedPeriod};
use crate::report::ReportFormat;

/// Prefix for environment variable overrides, e.g. `QUAKESWARM__CLUSTERING__MIN_SWARM_SIZE`
pub const ENV_PREFIX: &str = "QUAKESWARM";

/// Top-level configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Event feed configuration
    #[serde(default)]
    pub feed: FeedConfig,

    /// Clustering parameters
    #[serde(default)]
    pub clustering: ClusteringConfig,

    /// Report rendering
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where events are fetched from
#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// GeoJSON feed URL
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Parameters threaded through every clustering stage
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClusteringConfig {
    /// Neighbor and membership radius in kilometers
    #[serde(default = "default_search_distance_km")]
    pub search_distance_km: f64,

    /// Swarms with fewer members are culled
    #[serde(default = "default_min_swarm_size")]
    pub min_swarm_size: usize,

    /// Relaxation passes allowed per swarm before giving up
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Largest centroid shift, in degrees, still treated as converged.
    /// Zero demands exact equality.
    #[serde(default = "default_convergence_epsilon_deg")]
    pub convergence_epsilon_deg: f64,
}

/// Report rendering configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: ReportFormat,

    /// Decimal places in text reports
    #[serde(default = "default_precision")]
    pub precision: usize,
}

// Default values for optional configuration
fn default_feed_url() -> String {
    FeedLevel::All.url(FeedPeriod::Day)
}

fn default_timeout() -> u64 {
    60
}

fn default_search_distance_km() -> f64 {
    50.0
}

fn default_min_swarm_size() -> usize {
    5
}

fn default_max_iterations() -> usize {
    1000
}

fn default_convergence_epsilon_deg() -> f64 {
    1e-9
}

fn default_precision() -> usize {
    2
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            search_distance_km: default_search_distance_km(),
            min_swarm_size: default_min_swarm_size(),
            max_iterations: default_max_iterations(),
            convergence_epsilon_deg: default_convergence_epsilon_deg(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            precision: default_precision(),
        }
    }
}

impl ClusteringConfig {
    /// Reject parameter combinations the pipeline cannot run with
    pub fn validate(&self) -> Result<(), SwarmError> {
        if !self.search_distance_km.is_finite() || self.search_distance_km <= 0.0 {
            return Err(SwarmError::InvalidConfig(format!(
                "search_distance_km must be a positive number, got {}",
                self.search_distance_km
            )));
        }

        if self.min_swarm_size == 0 {
            return Err(SwarmError::InvalidConfig(
                "min_swarm_size must be at least 1".to_string(),
            ));
        }

        if self.max_iterations == 0 {
            return Err(SwarmError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        if !self.convergence_epsilon_deg.is_finite() || self.convergence_epsilon_deg < 0.0 {
            return Err(SwarmError::InvalidConfig(format!(
                "convergence_epsilon_deg must be zero or positive, got {}",
                self.convergence_epsilon_deg
            )));
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = toml::from_str(&config_text)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        Ok(config)
    }

    /// Load defaults, then the optional file, then `QUAKESWARM__*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| format!("Failed to load configuration from {:?}", path))?;

        settings
            .try_deserialize::<Config>()
            .context("Failed to deserialize configuration")
    }
}
