//! Command-failure reporting.

use tracing::error;

/// Log a command failure without letting it propagate.
///
/// The short form logs the top-level message only; the verbose toggle logs
/// the full error chain.
pub fn report_command_error(err: &anyhow::Error, show_full_error_log: bool, command: Option<&str>) {
    let command = command.unwrap_or("<unknown>");
    if show_full_error_log {
        error!(command, "[Commands] Command failed: {err:?}");
    } else {
        error!(command, "[Commands] Command failed: {err}");
    }
}
