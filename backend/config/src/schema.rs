//! Configuration schema, typed for serde TOML/JSON deserialization.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::defaults;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrierConfig {
    /// The bot configuration.
    pub configuration: Configuration,

    /// Debugging / verbosity toggles.
    pub debugging: Debugging,

    /// Server ids test-only commands are scoped to.
    pub test_servers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Trigger prefix for text commands.
    pub default_prefix: String,

    /// Directory scanned for command manifests; manifest discovery is
    /// disabled when unset.
    pub commands_dir: Option<PathBuf>,

    /// Which manifest suffix to load; files of the other kind are skipped.
    pub manifest_format: ManifestFormat,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            default_prefix: defaults::default_prefix(),
            commands_dir: None,
            manifest_format: ManifestFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Debugging {
    /// Log full error chains instead of one-line summaries.
    pub show_full_error_log: bool,

    /// Print the version banner at launch.
    pub show_banner: bool,
}

impl Default for Debugging {
    fn default() -> Self {
        Self {
            show_full_error_log: false,
            show_banner: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Manifest format
// ---------------------------------------------------------------------------

/// Source format for command manifest files.
///
/// An unrecognized value fails deserialization, which surfaces as a fatal
/// configuration error at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    Json,
    Toml,
}

impl Default for ManifestFormat {
    fn default() -> Self {
        Self::Json
    }
}

impl ManifestFormat {
    /// File extension this format claims; other suffixes are silently skipped.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}
