//! Notebook → markdown conversion.

use tracing::debug;

use crate::directive::{BR_COMMENT, code_comment, notebook_comment};
use crate::error::NotebookError;
use crate::notebook::{CellKind, Notebook};
use crate::scanner::{COMMENT_OPEN, SpanKind, scan};

/// Writes a notebook back as directive-annotated markdown.
///
/// Layout:
///
/// - document metadata, when present, as one `notebook:` comment at the top;
/// - each markup cell verbatim, followed by a `br:` comment;
/// - each code cell as a `code:` comment surrounded by blank lines.
///
/// Parsing the output with the built-in directives yields an equivalent
/// notebook. Markup cells with an unclosed `<!--` are rejected, since the
/// opener would pair with the following `br:` comment.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// Create a renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render `notebook` as markdown.
    ///
    /// # Errors
    ///
    /// Returns [`NotebookError::UnclosedComment`] for a markup cell whose
    /// text leaves a comment open, and [`NotebookError::Serialize`] when a
    /// payload cannot be written.
    pub fn render(&self, notebook: &Notebook) -> Result<String, NotebookError> {
        let mut markup = String::new();

        if !notebook.metadata.is_empty() {
            markup.push_str(&notebook_comment(&notebook.metadata).map_err(NotebookError::Serialize)?);
            markup.push('\n');
        }

        for (index, cell) in notebook.cells.iter().enumerate() {
            match cell.kind {
                CellKind::Markup => {
                    if has_unclosed_comment(&cell.content) {
                        return Err(NotebookError::UnclosedComment { cell: index });
                    }
                    markup.push_str(&cell.content);
                    markup.push_str("\n\n");
                    markup.push_str(BR_COMMENT);
                    markup.push_str("\n\n");
                }
                CellKind::Code => {
                    markup.push_str("\n\n");
                    markup.push_str(&code_comment(cell).map_err(NotebookError::Serialize)?);
                    markup.push_str("\n\n");
                }
            }
        }

        debug!(cells = notebook.cells.len(), bytes = markup.len(), "Rendered template");
        Ok(markup)
    }
}

/// Whether `content` ends in a `<!--` that no `-->` closes.
fn has_unclosed_comment(content: &str) -> bool {
    // Only the trailing text span can hold an unterminated opener
    scan(content).last().is_some_and(|span| {
        span.kind == SpanKind::Text && span.slice(content).contains(COMMENT_OPEN)
    })
}
