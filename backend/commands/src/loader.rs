//! The startup load pass: collect modules from every source, validate,
//! initialize, synchronize slash registrations, and populate the command
//! table. One bad module never aborts the load of the others.

use std::sync::Arc;

use anyhow::{Result, bail};
use crier_core::{AppHandle, CommandModule, CommandType};
use logging::report_command_error;
use tracing::info;

use crate::command::Command;
use crate::slash::{SlashCommandSync, options_for};
use crate::source::CommandSource;
use crate::table::CommandTable;
use crate::validations::ValidationRegistry;

pub struct CommandLoader {
    owner: Arc<AppHandle>,
    slash: SlashCommandSync,
    sources: Vec<Arc<dyn CommandSource>>,
}

impl CommandLoader {
    pub fn new(owner: Arc<AppHandle>, sources: Vec<Arc<dyn CommandSource>>) -> Self {
        let slash = SlashCommandSync::new(owner.registrar.clone());
        Self {
            owner,
            slash,
            sources,
        }
    }

    /// Run the load pass and return the populated table.
    ///
    /// Per-module failures are logged with the module's token and skipped;
    /// duplicate tokens overwrite earlier entries (last-loaded-wins).
    ///
    /// The summary line counts loaded modules, not table keys: a command
    /// with three aliases is one command, not four (documented behavior).
    pub async fn load(&self, registry: &ValidationRegistry) -> CommandTable {
        let mut table = CommandTable::new();
        let mut loaded = 0usize;

        for source in &self.sources {
            let modules = match source.collect().await {
                Ok(modules) => modules,
                Err(err) => {
                    report_command_error(
                        &err,
                        self.owner.show_full_error_log,
                        Some(source.name()),
                    );
                    continue;
                }
            };
            for module in modules {
                let token = module.name.to_lowercase();
                match self.load_module(&mut table, registry, &token, module).await {
                    Ok(true) => loaded += 1,
                    Ok(false) => {}
                    Err(err) => {
                        report_command_error(&err, self.owner.show_full_error_log, Some(&token));
                    }
                }
            }
        }

        match loaded {
            0 => info!("[Commands] No commands found"),
            1 => info!("[Commands] Loaded 1 command"),
            n => info!("[Commands] Loaded {n} commands"),
        }
        table
    }

    /// Load one module. `Ok(true)` means a table entry was added; `Ok(false)`
    /// means the module was a deletion stub and contributed none.
    async fn load_module(
        &self,
        table: &mut CommandTable,
        registry: &ValidationRegistry,
        token: &str,
        module: CommandModule,
    ) -> Result<bool> {
        if module.declaration.delete {
            self.delete_registration(token, module.declaration.test_only)
                .await;
            return Ok(false);
        }

        if module.callback.is_none() {
            bail!("command '{token}' has no callback bound");
        }

        let command = Arc::new(Command::new(self.owner.clone(), token, module));

        // Syntax validators all run independently; each failure is reported
        // on its own and does not block table insertion (kept permissive).
        for validator in registry.syntax() {
            if let Err(err) = validator.check(&command) {
                report_command_error(&err, self.owner.show_full_error_log, Some(token));
            }
        }

        if let Some(init) = command.init() {
            init.init(&self.owner.client, &self.owner).await?;
        }

        table.insert(token, command.clone());

        let declaration = command.declaration();
        if matches!(declaration.kind, CommandType::Slash | CommandType::Both) {
            let options = options_for(declaration);
            if declaration.test_only {
                for guild in &self.owner.test_servers {
                    if let Err(err) = self
                        .slash
                        .create(token, &declaration.description, &options, Some(guild))
                        .await
                    {
                        report_command_error(&err, self.owner.show_full_error_log, Some(token));
                    }
                }
            } else if let Err(err) = self
                .slash
                .create(token, &declaration.description, &options, None)
                .await
            {
                report_command_error(&err, self.owner.show_full_error_log, Some(token));
            }
        }

        if declaration.kind != CommandType::Slash {
            for alias in &declaration.aliases {
                table.insert(alias, command.clone());
            }
        }

        Ok(true)
    }

    /// Remove the remote registration for a deleted command: once per test
    /// server when `test_only`, else globally.
    async fn delete_registration(&self, token: &str, test_only: bool) {
        if test_only {
            for guild in &self.owner.test_servers {
                if let Err(err) = self.slash.delete(token, Some(guild)).await {
                    report_command_error(&err, self.owner.show_full_error_log, Some(token));
                }
            }
        } else if let Err(err) = self.slash.delete(token, None).await {
            report_command_error(&err, self.owner.show_full_error_log, Some(token));
        }
    }
}
