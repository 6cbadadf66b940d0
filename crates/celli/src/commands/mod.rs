//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod new;
pub(crate) mod version;

pub(crate) use convert::ConvertCommand;
pub(crate) use new::NewArgs;

use std::io::Write;

use crate::error::CliError;

/// Write a converted document to standard output.
fn write_stdout(data: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(data.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(CliError::Stdout)
}
