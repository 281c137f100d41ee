//! The dispatcher: resolve a trigger to a descriptor, run the run-time
//! validator chain, honor deferred-reply semantics, invoke the callback, and
//! hand the packaged result back to the event listener for delivery.

use std::sync::Arc;

use crier_core::{AppHandle, CommandType, Invocation, Reply, Trigger};
use logging::report_command_error;
use tracing::{debug, info};

use crate::command::Command;
use crate::loader::CommandLoader;
use crate::source::CommandSource;
use crate::table::CommandTable;
use crate::validations::{RuntimeValidator, ValidationRegistry, Verdict};

/// A command result packaged with its delivery flags. The event listener —
/// not the dispatcher — performs the actual send.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub reply: Reply,
    pub defer_reply: bool,
    pub ephemeral_reply: bool,
    /// Text triggers: reply to the message instead of sending to its channel.
    pub reply_to_message: bool,
}

/// The live handler: command table plus the run-time validator chain.
///
/// Built once at startup; the table is read-only afterwards, so concurrent
/// invocations need no locking.
pub struct CommandHandler {
    owner: Arc<AppHandle>,
    table: CommandTable,
    runtime: Vec<Arc<dyn RuntimeValidator>>,
}

impl CommandHandler {
    /// Run the load pass over `sources` and construct the handler.
    pub async fn build(
        owner: Arc<AppHandle>,
        sources: Vec<Arc<dyn CommandSource>>,
        registry: &ValidationRegistry,
    ) -> Arc<Self> {
        let loader = CommandLoader::new(owner.clone(), sources);
        let table = loader.load(registry).await;
        Arc::new(Self {
            owner,
            table,
            runtime: registry.runtime().to_vec(),
        })
    }

    pub fn owner(&self) -> &Arc<AppHandle> {
        &self.owner
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Case-insensitive descriptor lookup.
    pub fn resolve(&self, token: &str) -> Option<&Arc<Command>> {
        self.table.resolve(token)
    }

    /// Dispatch one invocation. `None` means nothing to deliver: unknown
    /// token, declined trigger, validator halt, or a swallowed callback error.
    pub async fn run(
        &self,
        token: &str,
        args: Vec<String>,
        trigger: Trigger,
    ) -> Option<DispatchOutcome> {
        let Some(command) = self.table.resolve(token) else {
            if let Trigger::Interaction(interaction) = &trigger {
                let notice =
                    Reply::text("This command is either deleted or is improperly registered");
                if let Err(err) = self
                    .owner
                    .client
                    .reply_interaction(interaction, &notice, true)
                    .await
                {
                    debug!("[Commands] Missing-command notice discarded: {err:#}");
                }
            }
            return None;
        };
        let command = command.clone();

        let is_message = matches!(trigger, Trigger::Message(_));
        let invocation = Invocation::new(self.owner.client.clone(), trigger, args);

        // A slash-only command must never execute via text trigger.
        if is_message && command.declaration().kind == CommandType::Slash {
            return None;
        }

        let prefix = if is_message {
            self.owner.default_prefix.as_str()
        } else {
            "/"
        };
        for validator in &self.runtime {
            match validator.check(&command, &invocation, prefix).await {
                Verdict::Pass => {}
                Verdict::Reject(notice) => {
                    self.deliver_notice(&invocation, notice).await;
                    return None;
                }
                Verdict::Handled => return None,
            }
        }

        let declaration = command.declaration().clone();
        if declaration.defer_reply {
            let acknowledged = match invocation.trigger() {
                Trigger::Interaction(interaction) => {
                    self.owner
                        .client
                        .defer_interaction(interaction, declaration.ephemeral_reply)
                        .await
                }
                Trigger::Message(message) => {
                    self.owner.client.send_typing(&message.channel_id).await
                }
            };
            if let Err(err) = acknowledged {
                report_command_error(&err, self.owner.show_full_error_log, Some(command.name()));
                return None;
            }
        }

        let callback = command.callback()?.clone();
        info!(
            command = command.name(),
            invocation = %invocation.id(),
            "[Commands] Dispatching"
        );
        match callback.invoke(invocation).await {
            Ok(reply) => Some(DispatchOutcome {
                reply,
                defer_reply: declaration.defer_reply,
                ephemeral_reply: declaration.ephemeral_reply,
                reply_to_message: declaration.reply,
            }),
            Err(err) => {
                report_command_error(&err, self.owner.show_full_error_log, Some(command.name()));
                None
            }
        }
    }

    /// Deliver a validator rejection through the trigger's own channel.
    /// Best-effort: a failed send is discarded.
    async fn deliver_notice(&self, invocation: &Invocation, notice: String) {
        let reply = Reply::Text(notice);
        let delivered = match invocation.trigger() {
            Trigger::Message(message) => {
                self.owner.client.reply_message(message, &reply).await
            }
            Trigger::Interaction(interaction) => {
                self.owner
                    .client
                    .reply_interaction(interaction, &reply, true)
                    .await
            }
        };
        if let Err(err) = delivered {
            debug!("[Commands] Validation notice discarded: {err:#}");
        }
    }
}
