use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::index::trie::DistanceMetric;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Window lengths must be greater than zero")]
    ZeroWindowLength,
}

/// Default mismatch budget for approximate clustering and binning
pub const DEFAULT_MISMATCHES: usize = 1;

/// Configuration for approximate clustering and bin classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Maximum distance for an approximate match to qualify
    pub mismatches: usize,
    /// How distance is measured
    pub metric: DistanceMetric,
    /// Window lengths for the multi-resolution index; `None` derives them
    /// from the distinct lengths of the indexed table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_lengths: Option<Vec<usize>>,
    /// Emit periodic progress while scanning
    pub report_progress: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            mismatches: DEFAULT_MISMATCHES,
            metric: DistanceMetric::default(),
            window_lengths: None,
            report_progress: true,
        }
    }
}

impl ClusterConfig {
    /// Load and validate a config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a config from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .window_lengths
            .as_ref()
            .is_some_and(|lengths| lengths.contains(&0))
        {
            return Err(ConfigError::ZeroWindowLength);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_mismatches(mut self, mismatches: usize) -> Self {
        self.mismatches = mismatches;
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    #[must_use]
    pub fn with_window_lengths(mut self, lengths: Vec<usize>) -> Self {
        self.window_lengths = Some(lengths);
        self
    }

    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.report_progress = false;
        self
    }
}
