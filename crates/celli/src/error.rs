//! CLI error types.

use std::path::PathBuf;

use celli_config::ConfigError;
use celli_notebook::NotebookError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Notebook(#[from] NotebookError),

    #[error("could not open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write to standard output")]
    Stdout(#[source] std::io::Error),

    #[error("{0}")]
    Validation(String),
}
