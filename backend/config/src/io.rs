//! Config file reading.

use std::path::Path;

use anyhow::{Context, Result};

use crate::schema::CrierConfig;

/// Load and parse a TOML config file.
pub async fn load_config(path: &Path) -> Result<CrierConfig> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: CrierConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}
