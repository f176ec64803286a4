//! Configuration for a pipeline run
//!
//! A [`PipelineConfig`] describes everything needed to execute a run: the
//! worker count, how many values flow through the chain, and the seeded
//! value range for the generator. Configs can be persisted as TOML files
//! so runs are reproducible.
//!
//! The defaults mirror the classic demonstration setup: four workers
//! processing one hundred values drawn uniformly from `[1.0, 10.0)` with
//! a fixed seed.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a single pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of workers in the chain (generator + transforms + accumulator)
    pub workers: usize,

    /// Number of values the generator emits through the chain
    pub num_elements: u64,

    /// Seed for the value generator; identical seeds reproduce identical runs
    pub seed: u64,

    /// Lower bound (inclusive) of generated values
    pub value_min: f64,

    /// Upper bound (exclusive) of generated values
    pub value_max: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            num_elements: 100,
            seed: 42,
            value_min: 1.0,
            value_max: 10.0,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration before forming the worker group
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(PipelineError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }
        if !(self.value_min < self.value_max) {
            return Err(PipelineError::Config(format!(
                "invalid value range [{}, {})",
                self.value_min, self.value_max
            )));
        }
        Ok(())
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            PipelineError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Load a config from a TOML file, falling back to defaults on failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the config as a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| PipelineError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            PipelineError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }
}
