//! `crier-gateway` — the top-level launch facade.
//!
//! Wires configuration, the platform client, command sources, and the
//! validator registry into a running [`CommandHandler`] with its event
//! listener loop, mirroring how a bot embeds the dispatch layer: build a
//! [`GatewayOptions`], call [`Gateway::launch`], then feed gateway events
//! into the channel returned by [`Gateway::events`].

use std::sync::Arc;

use anyhow::Result;
use crier_commands::{run_listeners, CommandHandler, CommandSource, ManifestSource, ValidationRegistry};
use crier_config::CrierConfig;
use crier_core::{AppHandle, CommandRegistrar, CrierError, GatewayEvent, PlatformClient, StorageHook};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Channel depth for inbound gateway events. Dispatch spawns a task per
/// event, so backpressure here only matters during a burst.
const EVENT_BUFFER: usize = 256;

/// Everything a host supplies to bring the dispatch layer up.
pub struct GatewayOptions {
    pub config: CrierConfig,
    pub client: Arc<dyn PlatformClient>,
    pub registrar: Arc<dyn CommandRegistrar>,
    /// Optional persistent-storage hookup. Connection failures only warn.
    pub storage: Option<Arc<dyn StorageHook>>,
    /// Explicit command sources, loaded in order before any manifest
    /// directory named in the config.
    pub sources: Vec<Arc<dyn CommandSource>>,
    pub registry: ValidationRegistry,
}

/// The running dispatch layer: a built handler plus the sender side of its
/// event loop.
pub struct Gateway {
    handler: Arc<CommandHandler>,
    events: mpsc::Sender<GatewayEvent>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway").finish_non_exhaustive()
    }
}

impl Gateway {
    /// Validate the config, connect storage, run the load pass, and start
    /// the listener loop.
    ///
    /// Config validation errors are fatal; warnings are logged and launch
    /// continues.
    pub async fn launch(options: GatewayOptions) -> Result<Self> {
        let GatewayOptions {
            config,
            client,
            registrar,
            storage,
            mut sources,
            registry,
        } = options;

        let report = crier_config::validate(&config);
        for warning in &report.warnings {
            warn!("[Gateway] {warning}");
        }
        if !report.is_valid() {
            let joined = report
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(CrierError::Config(joined).into());
        }

        if config.debugging.show_banner {
            info!("[Gateway] crier v{} starting", env!("CARGO_PKG_VERSION"));
        }

        match &storage {
            Some(hook) => {
                if let Err(err) = hook.connect().await {
                    warn!("[Gateway] {} connection failed: {err:#}", hook.name());
                } else {
                    info!("[Gateway] {} connected", hook.name());
                }
            }
            None => warn!("[Gateway] no storage configured"),
        }

        if let Some(dir) = &config.configuration.commands_dir {
            sources.push(Arc::new(ManifestSource::new(
                dir.clone(),
                config.configuration.manifest_format,
            )));
        }

        let owner = Arc::new(AppHandle {
            client,
            registrar,
            default_prefix: config.configuration.default_prefix.clone(),
            test_servers: config.test_servers.clone(),
            show_full_error_log: config.debugging.show_full_error_log,
        });

        let handler = CommandHandler::build(owner, sources, &registry).await;

        let (events, receiver) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(run_listeners(handler.clone(), receiver));

        Ok(Self { handler, events })
    }

    /// Sender half of the event loop; clone it into the connection layer.
    pub fn events(&self) -> mpsc::Sender<GatewayEvent> {
        self.events.clone()
    }

    pub fn handler(&self) -> &Arc<CommandHandler> {
        &self.handler
    }
}
