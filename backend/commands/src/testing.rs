//! Shared test support: a recording mock platform and module builders.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use crier_core::{
    AppHandle, CommandDeclaration, CommandInit, CommandInteraction, CommandModule,
    CommandOption, CommandRegistrar, FnCallback, IncomingMessage, InteractionKind,
    InteractionOption, Invocation, Member, PlatformClient, Reply, Trigger, User,
};

use crate::command::Command;

// ---------------------------------------------------------------------------
// Recording mock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    ReplyMessage { channel: String, text: String },
    SendChannel { channel: String, text: String },
    SendTyping { channel: String },
    Defer { id: String, ephemeral: bool },
    FollowUp { id: String, text: String },
    ReplyInteraction { id: String, text: String, ephemeral: bool },
    CreateCommand { name: String, guild: Option<String>, options: Vec<CommandOption> },
    DeleteCommand { name: String, guild: Option<String> },
}

#[derive(Default)]
pub(crate) struct MockPlatform {
    calls: Mutex<Vec<Call>>,
    fail_registrar: bool,
    fail_delivery: bool,
}

impl MockPlatform {
    pub(crate) fn failing_registrar() -> Self {
        Self {
            fail_registrar: true,
            ..Default::default()
        }
    }

    pub(crate) fn failing_delivery() -> Self {
        Self {
            fail_delivery: true,
            ..Default::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn text_of(reply: &Reply) -> String {
        match reply {
            Reply::Text(text) => text.clone(),
            Reply::Payload(value) => value.to_string(),
        }
    }
}

#[async_trait]
impl PlatformClient for MockPlatform {
    async fn reply_message(&self, message: &IncomingMessage, reply: &Reply) -> Result<()> {
        self.record(Call::ReplyMessage {
            channel: message.channel_id.clone(),
            text: Self::text_of(reply),
        });
        if self.fail_delivery {
            bail!("delivery refused");
        }
        Ok(())
    }

    async fn send_channel(&self, channel_id: &str, reply: &Reply) -> Result<()> {
        self.record(Call::SendChannel {
            channel: channel_id.to_string(),
            text: Self::text_of(reply),
        });
        if self.fail_delivery {
            bail!("delivery refused");
        }
        Ok(())
    }

    async fn send_typing(&self, channel_id: &str) -> Result<()> {
        self.record(Call::SendTyping {
            channel: channel_id.to_string(),
        });
        Ok(())
    }

    async fn defer_interaction(
        &self,
        interaction: &CommandInteraction,
        ephemeral: bool,
    ) -> Result<()> {
        self.record(Call::Defer {
            id: interaction.id.clone(),
            ephemeral,
        });
        Ok(())
    }

    async fn follow_up(&self, interaction: &CommandInteraction, reply: &Reply) -> Result<()> {
        self.record(Call::FollowUp {
            id: interaction.id.clone(),
            text: Self::text_of(reply),
        });
        if self.fail_delivery {
            bail!("delivery refused");
        }
        Ok(())
    }

    async fn reply_interaction(
        &self,
        interaction: &CommandInteraction,
        reply: &Reply,
        ephemeral: bool,
    ) -> Result<()> {
        self.record(Call::ReplyInteraction {
            id: interaction.id.clone(),
            text: Self::text_of(reply),
            ephemeral,
        });
        if self.fail_delivery {
            bail!("delivery refused");
        }
        Ok(())
    }
}

#[async_trait]
impl CommandRegistrar for MockPlatform {
    async fn create_command(
        &self,
        name: &str,
        _description: &str,
        options: &[CommandOption],
        guild_id: Option<&str>,
    ) -> Result<()> {
        self.record(Call::CreateCommand {
            name: name.to_string(),
            guild: guild_id.map(String::from),
            options: options.to_vec(),
        });
        if self.fail_registrar {
            bail!("registrar refused");
        }
        Ok(())
    }

    async fn delete_command(&self, name: &str, guild_id: Option<&str>) -> Result<()> {
        self.record(Call::DeleteCommand {
            name: name.to_string(),
            guild: guild_id.map(String::from),
        });
        if self.fail_registrar {
            bail!("registrar refused");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub(crate) fn owner(
    mock: &Arc<MockPlatform>,
    prefix: &str,
    test_servers: Vec<String>,
) -> Arc<AppHandle> {
    Arc::new(AppHandle {
        client: mock.clone(),
        registrar: mock.clone(),
        default_prefix: prefix.to_string(),
        test_servers,
        show_full_error_log: false,
    })
}

pub(crate) fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("user-{id}"),
        bot: false,
    }
}

pub(crate) fn message(content: &str) -> IncomingMessage {
    IncomingMessage {
        id: "m1".into(),
        channel_id: "c1".into(),
        guild_id: Some("g1".into()),
        author: user("u1"),
        member: Some(Member {
            user: user("u1"),
            nick: None,
        }),
        content: content.to_string(),
    }
}

pub(crate) fn interaction(
    name: &str,
    options: &[(&str, serde_json::Value)],
) -> CommandInteraction {
    CommandInteraction {
        id: "i1".into(),
        token: "itoken".into(),
        kind: InteractionKind::ChatInput,
        command_name: name.to_string(),
        options: options
            .iter()
            .map(|(option, value)| InteractionOption {
                name: option.to_string(),
                value: value.clone(),
            })
            .collect(),
        channel_id: "c1".into(),
        guild_id: Some("g1".into()),
        member: None,
        user: user("u1"),
    }
}

/// An invocation over a throwaway mock client, for validator-level tests.
pub(crate) fn message_invocation(args: &[&str]) -> Invocation {
    let client: Arc<dyn PlatformClient> = Arc::new(MockPlatform::default());
    Invocation::new(
        client,
        Trigger::Message(message("!test")),
        args.iter().map(|arg| arg.to_string()).collect(),
    )
}

/// A module whose callback replies with a fixed text.
pub(crate) fn module_replying(
    name: &str,
    declaration: CommandDeclaration,
    text: &str,
) -> CommandModule {
    let text = text.to_string();
    CommandModule::new(name, declaration).callback(Arc::new(FnCallback(move |_invocation: Invocation| {
        let text = text.clone();
        async move { Ok::<_, anyhow::Error>(Reply::Text(text)) }
    })))
}

/// A module with an "ok" callback, for tests that never invoke it.
pub(crate) fn module(name: &str, declaration: CommandDeclaration) -> CommandModule {
    module_replying(name, declaration, "ok")
}

/// A module whose callback echoes the joined argument text.
pub(crate) fn module_echoing_args(name: &str, declaration: CommandDeclaration) -> CommandModule {
    CommandModule::new(name, declaration).callback(Arc::new(FnCallback(
        |invocation: Invocation| async move {
            Ok::<_, anyhow::Error>(Reply::Text(invocation.text().to_string()))
        },
    )))
}

/// A module whose callback always fails.
pub(crate) fn module_failing(name: &str) -> CommandModule {
    CommandModule::new(name, CommandDeclaration::default()).callback(Arc::new(FnCallback(
        |_invocation: Invocation| async move { Err::<Reply, _>(anyhow!("callback exploded")) },
    )))
}

/// A descriptor owned by a throwaway mock, for table/validator tests.
pub(crate) fn command_owned(name: &str, declaration: CommandDeclaration) -> Command {
    let mock = Arc::new(MockPlatform::default());
    Command::new(owner(&mock, "!", vec![]), name, module(name, declaration))
}

pub(crate) fn command(name: &str, declaration: CommandDeclaration) -> Arc<Command> {
    Arc::new(command_owned(name, declaration))
}

// ---------------------------------------------------------------------------
// Initializers
// ---------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct CountingInit {
    count: AtomicUsize,
}

impl CountingInit {
    pub(crate) fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandInit for CountingInit {
    async fn init(
        &self,
        _client: &Arc<dyn PlatformClient>,
        _owner: &Arc<AppHandle>,
    ) -> Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub(crate) struct FailingInit;

#[async_trait]
impl CommandInit for FailingInit {
    async fn init(
        &self,
        _client: &Arc<dyn PlatformClient>,
        _owner: &Arc<AppHandle>,
    ) -> Result<()> {
        bail!("init exploded")
    }
}
