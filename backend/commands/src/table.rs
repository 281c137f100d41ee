//! The live command table: invocation token → descriptor.
//!
//! Owned by the handler boundary and populated once during the startup load
//! pass; read-only during steady-state dispatch, so no locking is needed.

use std::collections::HashMap;
use std::sync::Arc;

use crate::command::Command;

#[derive(Default)]
pub struct CommandTable {
    entries: HashMap<String, Arc<Command>>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under a token, case-folded to lowercase.
    ///
    /// Duplicate tokens overwrite the earlier entry (last-loaded-wins); the
    /// replaced descriptor is returned. Aliases share the same `Arc`.
    pub fn insert(&mut self, token: &str, command: Arc<Command>) -> Option<Arc<Command>> {
        self.entries.insert(token.to_lowercase(), command)
    }

    /// Case-insensitive lookup.
    pub fn resolve(&self, token: &str) -> Option<&Arc<Command>> {
        self.entries.get(&token.to_lowercase())
    }

    pub fn remove(&mut self, token: &str) -> Option<Arc<Command>> {
        self.entries.remove(&token.to_lowercase())
    }

    /// Number of table keys (primary names plus aliases).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
