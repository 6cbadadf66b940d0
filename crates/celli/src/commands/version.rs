//! `celli version` command implementation.

use super::write_stdout;
use crate::error::CliError;

/// Print the application version.
pub(crate) fn execute(version: &str) -> Result<(), CliError> {
    write_stdout(&format!("version: {version}\n"))
}
