//! Remote-command synchronizer: creates/deletes platform-side slash
//! registrations and derives option schemas from declared argument metadata.

use std::sync::Arc;

use anyhow::{Context, Result};
use crier_core::{CommandDeclaration, CommandOption, CommandRegistrar, OptionKind};
use tracing::info;

pub struct SlashCommandSync {
    registrar: Arc<dyn CommandRegistrar>,
}

impl SlashCommandSync {
    pub fn new(registrar: Arc<dyn CommandRegistrar>) -> Self {
        Self { registrar }
    }

    /// Register (or update) a slash command, globally or scoped to one
    /// server when `guild_id` is given.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        options: &[CommandOption],
        guild_id: Option<&str>,
    ) -> Result<()> {
        match guild_id {
            Some(guild) => info!(command = name, guild, "[Commands] Registering slash command"),
            None => info!(command = name, "[Commands] Registering global slash command"),
        }
        self.registrar
            .create_command(name, description, options, guild_id)
            .await
            .with_context(|| format!("Slash registration failed for '{name}'"))
    }

    /// Remove an existing registration, same scoping rule.
    pub async fn delete(&self, name: &str, guild_id: Option<&str>) -> Result<()> {
        match guild_id {
            Some(guild) => info!(command = name, guild, "[Commands] Deleting slash command"),
            None => info!(command = name, "[Commands] Deleting global slash command"),
        }
        self.registrar
            .delete_command(name, guild_id)
            .await
            .with_context(|| format!("Slash deletion failed for '{name}'"))
    }
}

/// The option schema to register: the explicit one if declared, else derived.
pub fn options_for(declaration: &CommandDeclaration) -> Vec<CommandOption> {
    declaration
        .options
        .clone()
        .unwrap_or_else(|| derive_options(declaration))
}

/// Synthesize an option schema from the `expectedArgs` hint and `minArgs`.
///
/// Best-effort approximation, not a grammar: every whitespace token of the
/// hint becomes one free-text option (brackets stripped, name slugged), and
/// options beyond the `minArgs` count are marked optional.
pub fn derive_options(declaration: &CommandDeclaration) -> Vec<CommandOption> {
    let Some(hint) = &declaration.expected_args else {
        return Vec::new();
    };
    hint.split_whitespace()
        .enumerate()
        .filter_map(|(index, token)| {
            let name = slug(token);
            if name.is_empty() {
                return None;
            }
            Some(CommandOption {
                description: token.to_string(),
                name,
                kind: OptionKind::String,
                required: index < declaration.min_args,
            })
        })
        .collect()
}

/// Lowercase-kebab option name from a hint token.
fn slug(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for c in token.trim_matches(|c| matches!(c, '<' | '>' | '[' | ']')).chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}
