//! Built-in load-time checks.

use anyhow::Result;
use crier_core::{CommandType, CrierError};

use crate::command::Command;
use crate::validations::SyntaxValidator;

/// A pure-slash command occupies exactly one table key; declaring aliases on
/// one is a declaration error.
pub struct SlashWithAliases;

impl SyntaxValidator for SlashWithAliases {
    fn name(&self) -> &'static str {
        "slash-with-aliases"
    }

    fn check(&self, command: &Command) -> Result<()> {
        let declaration = command.declaration();
        if declaration.kind == CommandType::Slash && !declaration.aliases.is_empty() {
            return Err(CrierError::rejected(
                command.name(),
                "slash-only command declares aliases",
            )
            .into());
        }
        Ok(())
    }
}
