//! The command descriptor — an immutable binding of name, declaration, and
//! owning application instance.

use std::sync::Arc;

use crier_core::{AppHandle, CommandCallback, CommandDeclaration, CommandInit, CommandModule};

/// A loaded command. Pure data holder: no validation happens here, and the
/// descriptor is never patched in place — reloads replace it wholesale.
pub struct Command {
    owner: Arc<AppHandle>,
    name: String,
    module: CommandModule,
}

impl Command {
    pub fn new(owner: Arc<AppHandle>, name: impl Into<String>, module: CommandModule) -> Self {
        Self {
            owner,
            name: name.into(),
            module,
        }
    }

    /// Canonical invocation token (already case-folded by the loader).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaration(&self) -> &CommandDeclaration {
        &self.module.declaration
    }

    pub fn callback(&self) -> Option<&Arc<dyn CommandCallback>> {
        self.module.callback.as_ref()
    }

    pub fn init(&self) -> Option<&Arc<dyn CommandInit>> {
        self.module.init.as_ref()
    }

    /// The hosting application instance. Read-only.
    pub fn owner(&self) -> &Arc<AppHandle> {
        &self.owner
    }
}
