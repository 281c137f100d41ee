//! Capability traits for the external collaborators the handler depends on.
//!
//! The remote platform client is treated as an opaque provider of
//! send/reply/defer operations; `crier-discord` supplies a REST-backed
//! implementation, tests supply recording mocks.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::command::{CommandOption, Reply};
use crate::context::{CommandInteraction, IncomingMessage};

/// Outbound operations on the remote platform.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Reply to the triggering message.
    async fn reply_message(&self, message: &IncomingMessage, reply: &Reply) -> Result<()>;

    /// Send to a channel without referencing a message.
    async fn send_channel(&self, channel_id: &str, reply: &Reply) -> Result<()>;

    /// Show the "working" typing indicator in a channel.
    async fn send_typing(&self, channel_id: &str) -> Result<()>;

    /// Acknowledge an interaction with a deferred state.
    async fn defer_interaction(&self, interaction: &CommandInteraction, ephemeral: bool)
        -> Result<()>;

    /// Follow up on a previously deferred interaction.
    async fn follow_up(&self, interaction: &CommandInteraction, reply: &Reply) -> Result<()>;

    /// Respond to an interaction directly.
    async fn reply_interaction(
        &self,
        interaction: &CommandInteraction,
        reply: &Reply,
        ephemeral: bool,
    ) -> Result<()>;
}

/// Remote registration API for named slash-style commands.
///
/// `guild_id` scopes the operation to one server; `None` means global.
#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    async fn create_command(
        &self,
        name: &str,
        description: &str,
        options: &[CommandOption],
        guild_id: Option<&str>,
    ) -> Result<()>;

    async fn delete_command(&self, name: &str, guild_id: Option<&str>) -> Result<()>;
}

/// Optional persistent-storage hookup, connected once at startup.
/// Connection failures are logged as warnings and never abort launch.
#[async_trait]
pub trait StorageHook: Send + Sync {
    fn name(&self) -> &str;

    async fn connect(&self) -> Result<()>;
}

/// The hosting application instance shared by every command descriptor.
///
/// Read-only after construction; descriptors never mutate it.
pub struct AppHandle {
    pub client: Arc<dyn PlatformClient>,
    pub registrar: Arc<dyn CommandRegistrar>,
    pub default_prefix: String,
    pub test_servers: Vec<String>,
    pub show_full_error_log: bool,
}
