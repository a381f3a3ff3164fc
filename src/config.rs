use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schema: Option<PathBuf>,

    #[serde(default)]
    pub strict: bool,

    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: None,
            strict: false,
            pretty: default_pretty(),
        }
    }
}

impl Config {
    /// Loads `path`, falling back to the defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults.");
            return Ok(Config::default());
        }

        toml::from_str(
            &std::fs::read_to_string(path)
                .with_context(|| format!("Failed to load config file '{}'.", path.display()))?,
        )
        .with_context(|| format!("Failed to parse config file '{}'.", path.display()))
    }
}

fn default_pretty() -> bool {
    true
}
