//! `crier-config` — configuration surface for the crier command handler.
//!
//! Provides:
//! - Typed config schema (prefix, commands directory, manifest format,
//!   test servers, debugging toggles)
//! - TOML read with context-rich errors
//! - Default value application via serde
//! - Validation with field-path error reporting

pub mod defaults;
pub mod io;
pub mod schema;
pub mod validation;

pub use io::load_config;
pub use schema::{Configuration, CrierConfig, Debugging, ManifestFormat};
pub use validation::{validate, ConfigValidationError, ValidationReport};
