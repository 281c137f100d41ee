use thiserror::Error;

/// Top-level error type for the crier runtime.
///
/// Only `Config` is treated as fatal at startup; every other variant is
/// reported and the affected command is skipped.
#[derive(Debug, Error)]
pub enum CrierError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("command '{name}' rejected: {message}")]
    CommandRejected { name: String, message: String },

    #[error("slash registration failed for '{0}'")]
    Registration(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CrierError {
    /// Shorthand for a syntax-rule violation against a named command.
    pub fn rejected(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CommandRejected {
            name: name.into(),
            message: message.into(),
        }
    }
}
