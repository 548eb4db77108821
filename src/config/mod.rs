//! Configuration management module

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::model::Config;

/// Ensure the configuration directory exists
pub fn ensure_config_dir() -> Result<PathBuf> {
    let config_path = Config::config_path();
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    Ok(config_path)
}

/// Load configuration, writing the defaults on first run
pub fn load_or_create_config() -> Result<Config> {
    let config_path = Config::config_path();

    if config_path.exists() {
        Config::load().with_context(|| format!("invalid config file {}", config_path.display()))
    } else {
        let config = Config::default();
        save_config(&config)?;
        debug!(path = %config_path.display(), "wrote default config");
        Ok(config)
    }
}

/// Save configuration
pub fn save_config(config: &Config) -> Result<()> {
    ensure_config_dir()?;
    config.save()
}
