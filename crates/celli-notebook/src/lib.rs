//! Notebook transcoding for celli.
//!
//! Converts between two representations of the same notebook:
//!
//! - a cell-based JSON document ([`Notebook`]) made of ordered markup and code
//!   cells plus document metadata;
//! - a flat markdown document where everything that is not markup is encoded
//!   as an HTML comment directive, `<!-- key:payload -->`.
//!
//! # Architecture
//!
//! The forward direction (markdown → notebook) runs in four stages:
//!
//! 1. **Scanning** ([`scanner`]): the source is split into an ordered,
//!    gap-free cover of text and comment spans.
//! 2. **Node building**: each comment span is decomposed into `key:payload`
//!    and resolved against a [`DirectiveRegistry`]. Comments that do not
//!    decompose, or whose key is unknown, stay as literal text.
//! 3. **Optimization**: consecutive text nodes are merged so that a run of
//!    text interrupted only by inert comments becomes one markup cell.
//! 4. **Rendering**: nodes are applied in order to a fresh [`Notebook`].
//!    Text becomes markup cells; directives call their [`Directive`] handler.
//!
//! The inverse direction ([`TemplateRenderer`]) walks a notebook and writes
//! markdown using `notebook:`, `br:` and `code:` comments, in a layout the
//! forward parser reads back into an equivalent notebook.
//!
//! # Example
//!
//! ```
//! use celli_notebook::{CellKind, MarkupParser};
//!
//! let parser = MarkupParser::with_builtins();
//! let notebook = parser
//!     .parse_str("Hello\n\n<!-- code:{\"lang\":\"go\",\"content\":\"fmt.Println(1)\"} -->\n\nBye")
//!     .unwrap();
//!
//! assert_eq!(notebook.cells.len(), 3);
//! assert_eq!(notebook.cells[1].kind, CellKind::Code);
//! assert_eq!(notebook.cells[1].language_id, "go");
//! ```

pub mod directive;
mod error;
mod fetch;
mod node;
mod notebook;
mod parser;
pub mod scanner;
mod template;

pub use directive::{
    AuthorDirective, BrDirective, CodeDirective, Directive, DirectiveError, DirectiveRegistry,
    NotebookDirective,
};
pub use error::{Location, NotebookError};
pub use fetch::{ContentFetcher, FetchError};
pub use notebook::{Cell, CellKind, MARKDOWN_LANGUAGE_ID, Notebook, UnknownCellKind};
pub use parser::MarkupParser;
pub use template::TemplateRenderer;

use std::io::Read;

/// Convert directive-annotated markdown into a notebook.
///
/// Only the directives in `registry` are recognized; any other comment is
/// kept as markup text.
pub fn markup_to_notebook<R: Read>(
    source: R,
    registry: DirectiveRegistry,
) -> Result<Notebook, NotebookError> {
    MarkupParser::new(registry).parse(source)
}

/// Convert notebook JSON into directive-annotated markdown.
pub fn notebook_to_markup<R: Read>(source: R) -> Result<String, NotebookError> {
    let notebook = Notebook::from_reader(source)?;
    TemplateRenderer::new().render(&notebook)
}
