//! Optional YAML configuration for `weekfold process`.
//!
//! ```yaml
//! read:
//!   sheet: Plan
//!   header_row: 2
//! pipeline:
//!   sort_week_cols: true
//!   date_order: day_first
//!   serial_dates:
//!     threshold: 0.9
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use weekfold_core::PipelineOptions;
use weekfold_sheet::ReadOptions;

/// Largest header row accepted, matching the upload form's limit.
pub const MAX_HEADER_ROW: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub read: ReadOptions,
    pub pipeline: PipelineOptions,
}

impl Config {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(text)?;
        anyhow::ensure!(
            config.read.header_row <= MAX_HEADER_ROW,
            "header_row must be between 0 and {MAX_HEADER_ROW}"
        );
        Ok(config)
    }
}
