use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::miner::MineOptions;

/// Mining configuration, loadable from TOML and overridable from the
/// environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineConfig {
    /// Minimum run of consecutive spaces counted as a column separator
    pub space: usize,

    /// Consecutive non-matching interior lines tolerated before a block closes
    pub patience: usize,

    /// Force the first column to start at offset 0
    pub start_0: bool,
}

impl Default for MineConfig {
    fn default() -> Self {
        Self {
            space: 3,
            patience: 0,
            start_0: false,
        }
    }
}

impl MineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow!("Failed to read config file: {}", e))?;

        let config: MineConfig =
            toml::from_str(&content).map_err(|e| anyhow!("Failed to parse config file: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    pub fn load_from_env() -> Self {
        let mut config = Self::default();

        if let Ok(space) = std::env::var("TABLEMINE_SPACE") {
            if let Ok(value) = space.parse::<usize>() {
                config.space = value;
            }
        }

        if let Ok(patience) = std::env::var("TABLEMINE_PATIENCE") {
            if let Ok(value) = patience.parse::<usize>() {
                config.patience = value;
            }
        }

        if let Ok(start_0) = std::env::var("TABLEMINE_START_0") {
            config.start_0 = start_0.to_lowercase() == "true";
        }

        config
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| anyhow!("Failed to write config file: {}", e))?;

        Ok(())
    }

    /// A zero space threshold would make every character position a column
    /// boundary, so it is rejected up front.
    pub fn validate(&self) -> Result<()> {
        if self.space < 1 {
            return Err(anyhow!("space must be >= 1, got {}", self.space));
        }
        Ok(())
    }

    pub fn options(&self) -> MineOptions {
        MineOptions {
            space: self.space,
            patience: self.patience,
            start_0: self.start_0,
        }
    }
}
