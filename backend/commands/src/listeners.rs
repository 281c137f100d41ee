//! Event listeners: normalize inbound gateway events into dispatcher calls
//! and deliver the packaged outcome back through the correct channel.
//!
//! Each event runs in its own spawned task, so concurrent invocations
//! interleave at await points without blocking the listener loop.

use std::sync::Arc;

use crier_core::{CommandInteraction, GatewayEvent, IncomingMessage, Reply, Trigger};
use tokio::sync::mpsc;
use tracing::debug;

use crate::dispatch::CommandHandler;

/// Consume gateway events until the channel closes.
pub async fn run_listeners(handler: Arc<CommandHandler>, mut events: mpsc::Receiver<GatewayEvent>) {
    while let Some(event) = events.recv().await {
        let handler = handler.clone();
        tokio::spawn(async move {
            match event {
                GatewayEvent::MessageCreate(message) => on_message(handler, message).await,
                GatewayEvent::InteractionCreate(interaction) => {
                    on_interaction(handler, interaction).await
                }
            }
        });
    }
}

/// Split prefixed message content into a lowercased token and its argument
/// list. `None` when the content is not a command trigger.
fn parse_message(content: &str, prefix: &str) -> Option<(String, Vec<String>)> {
    if !content.starts_with(prefix) {
        return None;
    }
    let mut words = content.split_whitespace();
    let token = words.next()?.strip_prefix(prefix)?.to_lowercase();
    if token.is_empty() {
        return None;
    }
    let args = words.map(String::from).collect();
    Some((token, args))
}

pub(crate) async fn on_message(handler: Arc<CommandHandler>, message: IncomingMessage) {
    if message.author.bot {
        return;
    }
    let Some((token, args)) = parse_message(&message.content, &handler.owner().default_prefix)
    else {
        return;
    };

    let Some(outcome) = handler
        .run(&token, args, Trigger::Message(message.clone()))
        .await
    else {
        return;
    };

    let client = &handler.owner().client;
    let delivered = if outcome.reply_to_message {
        client.reply_message(&message, &outcome.reply).await
    } else {
        client.send_channel(&message.channel_id, &outcome.reply).await
    };
    if let Err(err) = delivered {
        debug!("[Commands] Message delivery discarded: {err:#}");
    }
}

pub(crate) async fn on_interaction(handler: Arc<CommandHandler>, interaction: CommandInteraction) {
    if !interaction.is_chat_input() {
        return;
    }
    // Supplied option values, stringified in declaration order.
    let args: Vec<String> = interaction
        .options
        .iter()
        .map(|option| option.value_text())
        .collect();
    let token = interaction.command_name.clone();

    let Some(outcome) = handler
        .run(&token, args, Trigger::Interaction(interaction.clone()))
        .await
    else {
        return;
    };

    let client = &handler.owner().client;
    let delivered = if outcome.defer_reply {
        client.follow_up(&interaction, &outcome.reply).await
    } else {
        match &outcome.reply {
            Reply::Text(_) => {
                client
                    .reply_interaction(&interaction, &outcome.reply, outcome.ephemeral_reply)
                    .await
            }
            // Raw structured results go out as-is, never ephemeral-flagged.
            Reply::Payload(_) => {
                client
                    .reply_interaction(&interaction, &outcome.reply, false)
                    .await
            }
        }
    };
    if let Err(err) = delivered {
        debug!("[Commands] Interaction delivery discarded: {err:#}");
    }
}
