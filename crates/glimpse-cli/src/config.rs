use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glimpse_core::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Contents of `glimpse.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub engine: EngineConfig,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load `path`, falling back to defaults when it is missing or malformed
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Command-line values take precedence over the file
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.engine.seed = seed;
        }
        self
    }
}
