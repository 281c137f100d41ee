//! Config validation: schema checks with user-friendly error messages.
//!
//! A report with errors makes launch fail hard; warnings only log.

use thiserror::Error;

use crate::schema::CrierConfig;

/// A config validation finding with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation findings from one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &CrierConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_prefix(config, &mut report);
    validate_commands_dir(config, &mut report);
    validate_test_servers(config, &mut report);
    report
}

fn validate_prefix(config: &CrierConfig, report: &mut ValidationReport) {
    let prefix = &config.configuration.default_prefix;
    if prefix.trim().is_empty() {
        report.error("configuration.defaultPrefix", "Prefix cannot be empty");
    } else if prefix.chars().any(char::is_whitespace) {
        report.error(
            "configuration.defaultPrefix",
            "Prefix cannot contain whitespace",
        );
    }
}

fn validate_commands_dir(config: &CrierConfig, report: &mut ValidationReport) {
    let Some(dir) = &config.configuration.commands_dir else {
        return;
    };
    if !dir.exists() {
        report.warn(
            "configuration.commandsDir",
            format!("Directory {} does not exist; no manifests will load", dir.display()),
        );
    }
}

fn validate_test_servers(config: &CrierConfig, report: &mut ValidationReport) {
    for (index, id) in config.test_servers.iter().enumerate() {
        let path = format!("testServers[{index}]");
        if id.trim().is_empty() {
            report.error(&path, "Server id cannot be empty");
        } else if !id.chars().all(|c| c.is_ascii_digit()) {
            report.warn(&path, "Server id is not numeric");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let report = validate(&CrierConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn empty_prefix_is_error() {
        let mut config = CrierConfig::default();
        config.configuration.default_prefix = "  ".to_string();
        let report = validate(&config);
        assert!(!report.is_valid());
        assert!(report.errors[0].path.contains("defaultPrefix"));
    }

    #[test]
    fn whitespace_prefix_is_error() {
        let mut config = CrierConfig::default();
        config.configuration.default_prefix = "! ".to_string();
        let report = validate(&config);
        assert!(!report.is_valid());
    }

    #[test]
    fn empty_test_server_id_is_error() {
        let mut config = CrierConfig::default();
        config.test_servers = vec!["123".into(), "".into()];
        let report = validate(&config);
        assert!(!report.is_valid());
        assert!(report.errors[0].path.contains("testServers[1]"));
    }

    #[test]
    fn non_numeric_test_server_is_warning_only() {
        let mut config = CrierConfig::default();
        config.test_servers = vec!["my-guild".into()];
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }
}
