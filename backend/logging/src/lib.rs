//! Structured logging for crier.
//!
//! Console + rolling-file `tracing` setup, plus the shared command-error
//! reporter used by the loader and dispatcher.

pub mod logger;
pub mod report;

pub use logger::init_logger;
pub use report::report_command_error;
