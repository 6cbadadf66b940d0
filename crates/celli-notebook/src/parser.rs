//! Markdown → notebook conversion.

use std::io::Read;

use tracing::debug;

use crate::directive::{Directive, DirectiveRegistry};
use crate::error::{Location, NotebookError};
use crate::fetch::ContentFetcher;
use crate::node::{self, Node};
use crate::notebook::Notebook;
use crate::scanner;

/// Parser turning directive-annotated markdown into a [`Notebook`].
///
/// # Example
///
/// ```
/// use celli_notebook::{BrDirective, DirectiveRegistry, MarkupParser};
///
/// let parser = MarkupParser::new(DirectiveRegistry::new()).with_directive(BrDirective);
/// let notebook = parser.parse_str("First\n<!-- br: -->\nSecond").unwrap();
///
/// let contents: Vec<_> = notebook.cells.iter().map(|c| c.content.as_str()).collect();
/// assert_eq!(contents, ["First", "Second"]);
/// ```
pub struct MarkupParser {
    registry: DirectiveRegistry,
}

impl MarkupParser {
    /// Create a parser recognizing the directives in `registry`.
    #[must_use]
    pub fn new(registry: DirectiveRegistry) -> Self {
        Self { registry }
    }

    /// Create a parser with the built-in directives and a default fetcher.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new(DirectiveRegistry::with_builtins(ContentFetcher::default()))
    }

    /// Register an additional directive handler.
    #[must_use]
    pub fn with_directive<D: Directive + 'static>(mut self, directive: D) -> Self {
        self.registry.register(directive);
        self
    }

    /// The directives this parser recognizes.
    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Read markdown from `source` and convert it.
    pub fn parse<R: Read>(&self, mut source: R) -> Result<Notebook, NotebookError> {
        let mut markup = String::new();
        source
            .read_to_string(&mut markup)
            .map_err(NotebookError::ReadMarkup)?;
        self.parse_str(&markup)
    }

    /// Convert markdown text.
    ///
    /// Fails on the first directive whose payload does not decode or whose
    /// handler fails; no partial notebook is returned.
    pub fn parse_str(&self, source: &str) -> Result<Notebook, NotebookError> {
        let spans = scanner::scan(source);
        let nodes = node::optimize(node::build(source, &spans, &self.registry));
        debug!(spans = spans.len(), nodes = nodes.len(), "Scanned markdown");

        let mut notebook = Notebook::new();
        for node in &nodes {
            match node {
                Node::Text(text) => text.render(&mut notebook),
                Node::Directive(directive) => directive.render(&mut notebook).map_err(|err| {
                    let location = Location::new(source, directive.start, directive.end);
                    NotebookError::directive(directive.key, location, err)
                })?,
            }
        }

        debug!(cells = notebook.cells.len(), "Rendered notebook");
        Ok(notebook)
    }
}
