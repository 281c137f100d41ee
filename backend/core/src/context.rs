//! Invocation context — one normalized structure for both trigger sources.
//!
//! The trigger origin is a tagged variant with exactly two cases, so consumers
//! never juggle a nullable message/interaction pair.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::traits::PlatformClient;

// ---------------------------------------------------------------------------
// Platform entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user: User,
    #[serde(default)]
    pub nick: Option<String>,
}

/// An inbound text message as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: String,
    pub channel_id: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    pub author: User,
    #[serde(default)]
    pub member: Option<Member>,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// A structured text-input (slash) invocation.
    ChatInput,
    /// Anything else (components, autocomplete, ...) — not dispatched.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionOption {
    pub name: String,
    pub value: serde_json::Value,
}

impl InteractionOption {
    /// Option value as the string the argument list carries.
    pub fn value_text(&self) -> String {
        match &self.value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// An inbound structured interaction as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInteraction {
    pub id: String,
    pub token: String,
    pub kind: InteractionKind,
    pub command_name: String,
    /// Supplied option values, in declaration order.
    #[serde(default)]
    pub options: Vec<InteractionOption>,
    pub channel_id: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub member: Option<Member>,
    pub user: User,
}

impl CommandInteraction {
    pub fn is_chat_input(&self) -> bool {
        self.kind == InteractionKind::ChatInput
    }
}

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// The origin of an invocation.
#[derive(Debug, Clone)]
pub enum Trigger {
    Message(IncomingMessage),
    Interaction(CommandInteraction),
}

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

/// Ephemeral per-event context handed to validators and the callback.
///
/// Constructed fresh per invocation; never persisted or reused.
#[derive(Clone)]
pub struct Invocation {
    id: Uuid,
    client: Arc<dyn PlatformClient>,
    trigger: Trigger,
    args: Vec<String>,
    text: String,
}

impl Invocation {
    pub fn new(client: Arc<dyn PlatformClient>, trigger: Trigger, args: Vec<String>) -> Self {
        let text = args.join(" ");
        Self {
            id: Uuid::new_v4(),
            client,
            trigger,
            args,
            text,
        }
    }

    /// Correlation id for log lines belonging to this invocation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn client(&self) -> &Arc<dyn PlatformClient> {
        &self.client
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Arguments rejoined as a single text blob.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn message(&self) -> Option<&IncomingMessage> {
        match &self.trigger {
            Trigger::Message(message) => Some(message),
            Trigger::Interaction(_) => None,
        }
    }

    pub fn interaction(&self) -> Option<&CommandInteraction> {
        match &self.trigger {
            Trigger::Message(_) => None,
            Trigger::Interaction(interaction) => Some(interaction),
        }
    }

    pub fn guild_id(&self) -> Option<&str> {
        match &self.trigger {
            Trigger::Message(message) => message.guild_id.as_deref(),
            Trigger::Interaction(interaction) => interaction.guild_id.as_deref(),
        }
    }

    pub fn member(&self) -> Option<&Member> {
        match &self.trigger {
            Trigger::Message(message) => message.member.as_ref(),
            Trigger::Interaction(interaction) => interaction.member.as_ref(),
        }
    }

    pub fn user(&self) -> &User {
        match &self.trigger {
            Trigger::Message(message) => &message.author,
            Trigger::Interaction(interaction) => &interaction.user,
        }
    }

    pub fn channel_id(&self) -> &str {
        match &self.trigger {
            Trigger::Message(message) => &message.channel_id,
            Trigger::Interaction(interaction) => &interaction.channel_id,
        }
    }
}
