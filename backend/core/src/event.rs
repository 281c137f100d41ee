use serde::{Deserialize, Serialize};

use crate::context::{CommandInteraction, IncomingMessage};

/// An inbound event from the external client's transport.
///
/// Transports feed these over an mpsc channel; the command handler's
/// listeners consume them and route into the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "payload")]
pub enum GatewayEvent {
    MessageCreate(IncomingMessage),
    InteractionCreate(CommandInteraction),
}
