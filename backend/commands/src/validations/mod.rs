//! Pluggable validation: load-time syntax checks and per-invocation
//! run-time checks, each pool applied in insertion order (later validators
//! may assume earlier ones passed).

pub mod runtime;
pub mod syntax;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use crier_core::Invocation;

use crate::command::Command;

/// Load-time check on a command's declared shape. A failure rejects the
/// command with a descriptive error.
pub trait SyntaxValidator: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, command: &Command) -> Result<()>;
}

/// Outcome of a run-time check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Continue with the next validator (or the callback).
    Pass,
    /// Abort; the dispatcher delivers this notice to the invoker. For
    /// interaction triggers the notice is sent ephemeral, so a syntax slip
    /// is visible only to the invoker (text replies have no such flag).
    Reject(String),
    /// Abort silently; the validator already responded to the invoker.
    Handled,
}

/// Per-invocation check on context and arguments. `prefix` is the active
/// trigger prefix: the configured text prefix for messages, `/` for
/// interactions.
#[async_trait]
pub trait RuntimeValidator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self, command: &Command, invocation: &Invocation, prefix: &str) -> Verdict;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The two validator pools. The syntax pool is consumed once per command at
/// load time; the run-time pool is snapshotted at handler construction and
/// reused for every invocation.
pub struct ValidationRegistry {
    syntax: Vec<Arc<dyn SyntaxValidator>>,
    runtime: Vec<Arc<dyn RuntimeValidator>>,
}

impl ValidationRegistry {
    /// A registry with no validators at all.
    pub fn empty() -> Self {
        Self {
            syntax: Vec::new(),
            runtime: Vec::new(),
        }
    }

    /// The stock pools: slash-with-aliases (syntax), argument-count (run-time).
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register_syntax(Arc::new(syntax::SlashWithAliases));
        registry.register_runtime(Arc::new(runtime::ArgumentCount));
        registry
    }

    pub fn register_syntax(&mut self, validator: Arc<dyn SyntaxValidator>) {
        self.syntax.push(validator);
    }

    pub fn register_runtime(&mut self, validator: Arc<dyn RuntimeValidator>) {
        self.runtime.push(validator);
    }

    pub fn syntax(&self) -> &[Arc<dyn SyntaxValidator>] {
        &self.syntax
    }

    pub fn runtime(&self) -> &[Arc<dyn RuntimeValidator>] {
        &self.runtime
    }
}

impl Default for ValidationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
