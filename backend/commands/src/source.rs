//! Command discovery sources.
//!
//! Discovery is an explicit registration step returning structured metadata,
//! decoupled from any source-file naming scheme. `StaticSource` is the
//! in-code path; `ManifestSource` keeps the directory-walk semantics for
//! declaration files, binding callbacks registered by token.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use crier_config::ManifestFormat;
use crier_core::{CommandCallback, CommandDeclaration, CommandInit, CommandModule};
use tracing::warn;

use crate::files;

/// A provider of command modules, consumed once by the loader.
#[async_trait]
pub trait CommandSource: Send + Sync {
    /// Source name for load-failure logs.
    fn name(&self) -> &str;

    async fn collect(&self) -> Result<Vec<CommandModule>>;
}

// ---------------------------------------------------------------------------
// Static source
// ---------------------------------------------------------------------------

/// Modules registered directly in code.
pub struct StaticSource {
    modules: Vec<CommandModule>,
}

impl StaticSource {
    pub fn new(modules: Vec<CommandModule>) -> Self {
        Self { modules }
    }
}

#[async_trait]
impl CommandSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn collect(&self) -> Result<Vec<CommandModule>> {
        Ok(self.modules.clone())
    }
}

// ---------------------------------------------------------------------------
// Manifest source
// ---------------------------------------------------------------------------

/// Directory-backed source reading declaration manifests.
///
/// Files whose extension does not match the configured format are silently
/// skipped, so mixed-format trees load without error. The invocation token is
/// the file stem before the first `.`, lowercased. Callbacks and initializers
/// are bound from the maps registered here; a manifest that fails to parse is
/// logged with its token and skipped.
pub struct ManifestSource {
    dir: PathBuf,
    format: ManifestFormat,
    callbacks: HashMap<String, Arc<dyn CommandCallback>>,
    inits: HashMap<String, Arc<dyn CommandInit>>,
}

impl ManifestSource {
    pub fn new(dir: impl Into<PathBuf>, format: ManifestFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            callbacks: HashMap::new(),
            inits: HashMap::new(),
        }
    }

    /// Bind the callback executed for the given token.
    pub fn bind_callback(mut self, token: &str, callback: Arc<dyn CommandCallback>) -> Self {
        self.callbacks.insert(token.to_lowercase(), callback);
        self
    }

    /// Bind the optional initializer for the given token.
    pub fn bind_init(mut self, token: &str, init: Arc<dyn CommandInit>) -> Self {
        self.inits.insert(token.to_lowercase(), init);
        self
    }

    fn token_for(path: &Path) -> Option<String> {
        let file_name = path.file_name()?.to_str()?;
        let stem = file_name.split('.').next()?;
        if stem.is_empty() {
            return None;
        }
        Some(stem.to_lowercase())
    }

    async fn read_declaration(&self, path: &Path) -> Result<CommandDeclaration> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        let declaration = match self.format {
            ManifestFormat::Json => serde_json::from_str(&raw)
                .with_context(|| format!("Invalid JSON manifest {}", path.display()))?,
            ManifestFormat::Toml => toml::from_str(&raw)
                .with_context(|| format!("Invalid TOML manifest {}", path.display()))?,
        };
        Ok(declaration)
    }
}

#[async_trait]
impl CommandSource for ManifestSource {
    fn name(&self) -> &str {
        "manifests"
    }

    async fn collect(&self) -> Result<Vec<CommandModule>> {
        let mut modules = Vec::new();
        for path in files::all_files(&self.dir) {
            let matches_format = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.format.extension());
            if !matches_format {
                continue;
            }
            let Some(token) = Self::token_for(&path) else {
                continue;
            };
            match self.read_declaration(&path).await {
                Ok(declaration) => {
                    let mut module = CommandModule::new(token.clone(), declaration);
                    module.callback = self.callbacks.get(&token).cloned();
                    module.init = self.inits.get(&token).cloned();
                    modules.push(module);
                }
                Err(err) => {
                    warn!(command = %token, "[Commands] Skipping manifest: {err:#}");
                }
            }
        }
        Ok(modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crier_core::CommandType;

    fn manifest_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("crier-manifests-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn collects_matching_manifests_and_skips_other_suffixes() {
        let dir = manifest_dir("mixed");
        std::fs::write(
            dir.join("Ping.json"),
            r#"{"type": "both", "description": "Ping"}"#,
        )
        .unwrap();
        std::fs::write(dir.join("echo.toml"), "description = \"Echo\"").unwrap();

        let source = ManifestSource::new(&dir, ManifestFormat::Json);
        let modules = source.collect().await.unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "ping");
        assert_eq!(modules[0].declaration.kind, CommandType::Both);
        assert!(modules[0].callback.is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn malformed_manifest_is_skipped_not_fatal() {
        let dir = manifest_dir("broken");
        std::fs::write(dir.join("bad.json"), "{ not json").unwrap();
        std::fs::write(dir.join("good.json"), r#"{"description": "Fine"}"#).unwrap();

        let source = ManifestSource::new(&dir, ManifestFormat::Json);
        let modules = source.collect().await.unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "good");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn token_is_stem_before_first_separator() {
        let dir = manifest_dir("stem");
        std::fs::write(dir.join("Ban.test.json"), r#"{"description": "Ban"}"#).unwrap();

        let source = ManifestSource::new(&dir, ManifestFormat::Json);
        let modules = source.collect().await.unwrap();
        assert_eq!(modules[0].name, "ban");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn toml_manifests_parse() {
        let dir = manifest_dir("toml");
        std::fs::write(
            dir.join("kick.toml"),
            "type = \"slash\"\ndescription = \"Kick a member\"\nminArgs = 1\n",
        )
        .unwrap();

        let source = ManifestSource::new(&dir, ManifestFormat::Toml);
        let modules = source.collect().await.unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].declaration.min_args, 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
