//! Discord v10 REST client.
//!
//! Implements `CommandRegistrar` (application-command create/delete, global
//! or per-guild) and `PlatformClient` (messages, typing, interaction
//! callbacks and followups). Payload construction is split into pure helpers
//! so the wire shapes are testable without network access.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use crier_core::{
    CommandInteraction, CommandOption, CommandRegistrar, IncomingMessage, OptionKind,
    PlatformClient, Reply,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

const API_BASE: &str = "https://discord.com/api/v10";

/// Message flag marking an interaction response visible only to the invoker.
const EPHEMERAL_FLAG: u64 = 64;

pub struct DiscordRest {
    http: Client,
    application_id: String,
    token: String,
    base: String,
}

impl DiscordRest {
    pub fn new(application_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            application_id: application_id.into(),
            token: token.into(),
            base: API_BASE.to_string(),
        }
    }

    /// Override the API base URL (proxies, test servers).
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.token)
    }

    fn commands_route(&self, guild_id: Option<&str>) -> String {
        match guild_id {
            Some(guild) => format!(
                "{}/applications/{}/guilds/{}/commands",
                self.base, self.application_id, guild
            ),
            None => format!("{}/applications/{}/commands", self.base, self.application_id),
        }
    }

    async fn post(&self, url: &str, body: &Value) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(url)
            .header("Authorization", self.auth())
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?
            .error_for_status()
            .with_context(|| format!("POST {url} rejected"))?;
        Ok(response)
    }
}

// ---------------------------------------------------------------------------
// Wire payload builders
// ---------------------------------------------------------------------------

/// CHAT_INPUT application-command registration body.
pub fn command_payload(name: &str, description: &str, options: &[CommandOption]) -> Value {
    json!({
        "name": name,
        "description": description,
        "type": 1,
        "options": options.iter().map(option_payload).collect::<Vec<_>>(),
    })
}

pub fn option_payload(option: &CommandOption) -> Value {
    json!({
        "type": option_wire_type(&option.kind),
        "name": option.name,
        "description": option.description,
        "required": option.required,
    })
}

pub fn option_wire_type(kind: &OptionKind) -> u8 {
    match kind {
        OptionKind::String => 3,
        OptionKind::Integer => 4,
        OptionKind::Boolean => 5,
        OptionKind::Number => 10,
    }
}

/// Message body for a reply: plain text becomes `content`, structured
/// payloads go out as-is.
pub fn reply_body(reply: &Reply) -> Value {
    match reply {
        Reply::Text(text) => json!({ "content": text }),
        Reply::Payload(value) => value.clone(),
    }
}

fn flagged(mut body: Value, ephemeral: bool) -> Value {
    if ephemeral {
        if let Some(map) = body.as_object_mut() {
            map.insert("flags".to_string(), json!(EPHEMERAL_FLAG));
        }
    }
    body
}

#[derive(Debug, Deserialize)]
struct RegisteredCommand {
    id: String,
    name: String,
}

// ---------------------------------------------------------------------------
// Registrar
// ---------------------------------------------------------------------------

#[async_trait]
impl CommandRegistrar for DiscordRest {
    /// POST upserts by name, so create doubles as update.
    async fn create_command(
        &self,
        name: &str,
        description: &str,
        options: &[CommandOption],
        guild_id: Option<&str>,
    ) -> Result<()> {
        let url = self.commands_route(guild_id);
        self.post(&url, &command_payload(name, description, options))
            .await?;
        debug!(command = name, "Registered application command");
        Ok(())
    }

    async fn delete_command(&self, name: &str, guild_id: Option<&str>) -> Result<()> {
        let url = self.commands_route(guild_id);
        let registered: Vec<RegisteredCommand> = self
            .http
            .get(&url)
            .header("Authorization", self.auth())
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {url} rejected"))?
            .json()
            .await
            .context("Malformed command list")?;

        let Some(command) = registered.iter().find(|c| c.name == name) else {
            bail!("no registration named '{name}'");
        };
        let delete_url = format!("{url}/{}", command.id);
        self.http
            .delete(&delete_url)
            .header("Authorization", self.auth())
            .send()
            .await
            .with_context(|| format!("DELETE {delete_url} failed"))?
            .error_for_status()
            .with_context(|| format!("DELETE {delete_url} rejected"))?;
        debug!(command = name, "Deleted application command");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Platform client
// ---------------------------------------------------------------------------

#[async_trait]
impl PlatformClient for DiscordRest {
    async fn reply_message(&self, message: &IncomingMessage, reply: &Reply) -> Result<()> {
        let url = format!("{}/channels/{}/messages", self.base, message.channel_id);
        let mut body = reply_body(reply);
        if let Some(map) = body.as_object_mut() {
            map.insert(
                "message_reference".to_string(),
                json!({ "message_id": message.id }),
            );
        }
        self.post(&url, &body).await?;
        Ok(())
    }

    async fn send_channel(&self, channel_id: &str, reply: &Reply) -> Result<()> {
        let url = format!("{}/channels/{}/messages", self.base, channel_id);
        self.post(&url, &reply_body(reply)).await?;
        Ok(())
    }

    async fn send_typing(&self, channel_id: &str) -> Result<()> {
        let url = format!("{}/channels/{}/typing", self.base, channel_id);
        self.http
            .post(&url)
            .header("Authorization", self.auth())
            .header("Content-Length", "0")
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?
            .error_for_status()
            .with_context(|| format!("POST {url} rejected"))?;
        Ok(())
    }

    async fn defer_interaction(
        &self,
        interaction: &CommandInteraction,
        ephemeral: bool,
    ) -> Result<()> {
        let url = format!(
            "{}/interactions/{}/{}/callback",
            self.base, interaction.id, interaction.token
        );
        // Type 5: deferred channel message with source.
        let body = json!({
            "type": 5,
            "data": flagged(json!({}), ephemeral),
        });
        self.post(&url, &body).await?;
        Ok(())
    }

    async fn follow_up(&self, interaction: &CommandInteraction, reply: &Reply) -> Result<()> {
        let url = format!(
            "{}/webhooks/{}/{}",
            self.base, self.application_id, interaction.token
        );
        self.post(&url, &reply_body(reply)).await?;
        Ok(())
    }

    async fn reply_interaction(
        &self,
        interaction: &CommandInteraction,
        reply: &Reply,
        ephemeral: bool,
    ) -> Result<()> {
        let url = format!(
            "{}/interactions/{}/{}/callback",
            self.base, interaction.id, interaction.token
        );
        // Type 4: channel message with source.
        let body = json!({
            "type": 4,
            "data": flagged(reply_body(reply), ephemeral),
        });
        self.post(&url, &body).await?;
        Ok(())
    }
}
