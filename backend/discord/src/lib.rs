//! `crier-discord` — Discord REST implementation of the platform traits.
//!
//! Speaks the v10 HTTP API directly with `reqwest`; the gateway websocket is
//! not handled here. A transport (or webhook receiver) converts inbound
//! payloads into `GatewayEvent`s and feeds them over the handler's channel.

pub mod rest;

pub use rest::DiscordRest;
