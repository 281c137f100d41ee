//! Command declarations — the structured metadata a command author supplies.
//!
//! A `CommandDeclaration` is plain serde data so it can come from an in-code
//! registration or be deserialized from a manifest file. The executable parts
//! (callback, optional initializer) are bound separately in a `CommandModule`.

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::Invocation;
use crate::traits::{AppHandle, PlatformClient};

// ---------------------------------------------------------------------------
// Trigger type
// ---------------------------------------------------------------------------

/// How a command may be invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    /// Prefix-triggered text command only.
    Legacy,
    /// Slash-style interaction only.
    Slash,
    /// Both trigger sources.
    Both,
}

impl Default for CommandType {
    fn default() -> Self {
        Self::Legacy
    }
}

// ---------------------------------------------------------------------------
// Slash option schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    String,
    Integer,
    Number,
    Boolean,
}

/// One option in a slash-command registration schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub required: bool,
}

// ---------------------------------------------------------------------------
// Declaration
// ---------------------------------------------------------------------------

/// The raw behavior object supplied by a command author.
///
/// Every field is defaulted so a manifest only has to spell out what it uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommandDeclaration {
    /// Trigger type; prefix-only when omitted.
    #[serde(rename = "type")]
    pub kind: CommandType,
    pub description: String,
    /// Minimum accepted argument count.
    pub min_args: usize,
    /// Maximum accepted argument count; `None` means unbounded.
    pub max_args: Option<usize>,
    /// Syntax-error message template. Supports the `[PREFIX]` and `[ARGS]`
    /// substitution tokens.
    pub correct_syntax: Option<String>,
    /// Argument hint text, `<required>` / `[optional]` convention.
    pub expected_args: Option<String>,
    /// Restrict slash registration to the configured test servers.
    pub test_only: bool,
    /// Remove this command's remote registration instead of loading it.
    pub delete: bool,
    pub aliases: Vec<String>,
    /// Explicit slash option schema; derived from `expected_args` when absent.
    pub options: Option<Vec<CommandOption>>,
    /// Acknowledge the interaction (or show typing) before the callback runs.
    pub defer_reply: bool,
    /// Interaction responses visible only to the invoker.
    pub ephemeral_reply: bool,
    /// Reply to the triggering message instead of sending to its channel.
    pub reply: bool,
}

// ---------------------------------------------------------------------------
// Reply
// ---------------------------------------------------------------------------

/// What a command callback produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text content.
    Text(String),
    /// A raw structured platform payload (embeds, components, ...).
    Payload(serde_json::Value),
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(content) => Some(content),
            Self::Payload(_) => None,
        }
    }
}

impl From<String> for Reply {
    fn from(content: String) -> Self {
        Self::Text(content)
    }
}

impl From<&str> for Reply {
    fn from(content: &str) -> Self {
        Self::Text(content.to_string())
    }
}

// ---------------------------------------------------------------------------
// Callback & initializer traits
// ---------------------------------------------------------------------------

/// The function executed when a command is invoked.
#[async_trait]
pub trait CommandCallback: Send + Sync {
    async fn invoke(&self, invocation: Invocation) -> Result<Reply>;
}

/// Optional one-shot initializer awaited by the loader before registration.
#[async_trait]
pub trait CommandInit: Send + Sync {
    async fn init(&self, client: &Arc<dyn PlatformClient>, owner: &Arc<AppHandle>) -> Result<()>;
}

/// Adapter so plain async closures can serve as callbacks:
/// `FnCallback(|invocation| async move { Ok(Reply::text("pong")) })`.
pub struct FnCallback<F>(pub F);

#[async_trait]
impl<F, Fut> CommandCallback for FnCallback<F>
where
    F: Fn(Invocation) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Reply>> + Send,
{
    async fn invoke(&self, invocation: Invocation) -> Result<Reply> {
        (self.0)(invocation).await
    }
}

// ---------------------------------------------------------------------------
// Module
// ---------------------------------------------------------------------------

/// A discovered command: declaration plus its bound executable parts.
///
/// `callback` is optional only to accommodate deletion stubs — a module whose
/// declaration sets `delete` contributes no table entry and needs none.
#[derive(Clone)]
pub struct CommandModule {
    pub name: String,
    pub declaration: CommandDeclaration,
    pub callback: Option<Arc<dyn CommandCallback>>,
    pub init: Option<Arc<dyn CommandInit>>,
}

impl CommandModule {
    pub fn new(name: impl Into<String>, declaration: CommandDeclaration) -> Self {
        Self {
            name: name.into(),
            declaration,
            callback: None,
            init: None,
        }
    }

    pub fn callback(mut self, callback: Arc<dyn CommandCallback>) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn init(mut self, init: Arc<dyn CommandInit>) -> Self {
        self.init = Some(init);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_defaults_from_empty_manifest() {
        let decl: CommandDeclaration = serde_json::from_str("{}").unwrap();
        assert_eq!(decl.kind, CommandType::Legacy);
        assert_eq!(decl.min_args, 0);
        assert_eq!(decl.max_args, None);
        assert!(!decl.delete);
        assert!(decl.aliases.is_empty());
    }

    #[test]
    fn declaration_parses_camel_case_fields() {
        let decl: CommandDeclaration = serde_json::from_str(
            r#"{
                "type": "both",
                "description": "Ping the bot",
                "minArgs": 1,
                "maxArgs": 2,
                "expectedArgs": "<target> [count]",
                "deferReply": true,
                "aliases": ["p"]
            }"#,
        )
        .unwrap();
        assert_eq!(decl.kind, CommandType::Both);
        assert_eq!(decl.min_args, 1);
        assert_eq!(decl.max_args, Some(2));
        assert!(decl.defer_reply);
        assert_eq!(decl.aliases, vec!["p".to_string()]);
    }

    #[test]
    fn option_kind_serializes_lowercase() {
        let opt = CommandOption {
            name: "target".into(),
            description: "Who to ping".into(),
            kind: OptionKind::String,
            required: true,
        };
        let value = serde_json::to_value(&opt).unwrap();
        assert_eq!(value["type"], "string");
        assert_eq!(value["required"], true);
    }
}
