//! Stock values applied when a config section is absent.

/// Default text-command trigger prefix.
pub fn default_prefix() -> String {
    "!".to_string()
}
