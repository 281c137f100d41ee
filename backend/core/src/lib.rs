pub mod command;
pub mod context;
pub mod error;
pub mod event;
pub mod traits;

pub use command::{
    CommandCallback, CommandDeclaration, CommandInit, CommandModule, CommandOption, CommandType,
    FnCallback, OptionKind, Reply,
};
pub use context::{
    CommandInteraction, IncomingMessage, InteractionKind, InteractionOption, Invocation, Member,
    Trigger, User,
};
pub use error::CrierError;
pub use event::GatewayEvent;
pub use traits::{AppHandle, CommandRegistrar, PlatformClient, StorageHook};
