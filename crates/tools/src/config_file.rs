//! TOML overrides for [`GameConfig`]. Every section and field may be left out.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use crawl_core::GameConfig;
use log::info;

/// Reads and validates the config at `path`. No path, or a path that does not exist, means
/// the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    if !path.exists() {
        info!("no config at {}, using defaults", path.display());
        return Ok(GameConfig::default());
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: GameConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate().with_context(|| format!("Rejected config file: {}", path.display()))?;
    Ok(config)
}
