//! Colored terminal output utilities.

use std::error::Error;

use console::{Style, Term};

/// Terminal output formatter writing to stderr.
pub(crate) struct Output {
    term: Term,
    green: Style,
    red: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            red: Style::new().red(),
            dim: Style::new().red().dim(),
        }
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print an error followed by its chain of causes.
    pub(crate) fn error_chain(&self, err: &dyn Error) {
        self.error(&format!("Error: {err}"));
        for cause in causes(err) {
            let line = format!("  caused by: {cause}");
            let _ = self.term.write_line(&self.dim.apply_to(line).to_string());
        }
    }
}

/// Messages of every error in the `source()` chain, outermost first.
fn causes(err: &dyn Error) -> Vec<String> {
    let mut messages = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        messages.push(cause.to_string());
        current = cause.source();
    }
    messages
}
