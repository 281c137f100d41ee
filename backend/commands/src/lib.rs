//! `crier-commands` — the command registration and dispatch pipeline.
//!
//! Covers discovery (sources), descriptor construction, two-phase validation
//! (load-time syntax checks, per-invocation run-time checks), slash
//! synchronization, routing between text-message and interaction triggers,
//! and unified response delivery.

pub mod command;
pub mod dispatch;
pub mod files;
pub mod listeners;
pub mod loader;
pub mod slash;
pub mod source;
pub mod table;
pub mod validations;

pub use command::Command;
pub use dispatch::{CommandHandler, DispatchOutcome};
pub use listeners::run_listeners;
pub use loader::CommandLoader;
pub use slash::SlashCommandSync;
pub use source::{CommandSource, ManifestSource, StaticSource};
pub use table::CommandTable;
pub use validations::{RuntimeValidator, SyntaxValidator, ValidationRegistry, Verdict};

#[cfg(test)]
pub(crate) mod testing;
