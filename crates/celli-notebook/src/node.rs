//! Document nodes built from scanned spans.
//!
//! Text spans become text nodes. Comment spans become directive nodes when
//! they parse as `key:payload` with a registered key, and text nodes
//! otherwise. [`optimize`] then merges consecutive text nodes.

use std::borrow::Cow;

use tracing::warn;

use crate::directive::{Directive, DirectiveError, DirectiveRegistry, parse_comment};
use crate::notebook::Notebook;
use crate::scanner::{Span, SpanKind};

/// A unit of the document ready to be rendered into a notebook.
pub(crate) enum Node<'a> {
    Text(TextNode<'a>),
    Directive(DirectiveNode<'a>),
}

/// Literal markdown text, possibly merged from several spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextNode<'a> {
    pub start: usize,
    pub end: usize,
    pub text: Cow<'a, str>,
}

impl<'a> TextNode<'a> {
    fn new(span: Span, source: &'a str) -> Self {
        Self {
            start: span.start,
            end: span.end,
            text: Cow::Borrowed(span.slice(source)),
        }
    }

    /// Append a following text node, separated by a line break.
    fn append(&mut self, next: TextNode<'a>) {
        let text = self.text.to_mut();
        text.push('\n');
        text.push_str(&next.text);
        self.end = next.end;
    }

    /// Append the trimmed text as a markup cell, unless it is blank.
    pub fn render(&self, notebook: &mut Notebook) {
        let content = self.text.trim();
        if !content.is_empty() {
            notebook.push_markup(content);
        }
    }
}

/// A comment resolved to a registered directive handler.
pub(crate) struct DirectiveNode<'a> {
    pub start: usize,
    pub end: usize,
    pub key: &'a str,
    pub payload: &'a str,
    pub directive: &'a dyn Directive,
}

impl DirectiveNode<'_> {
    /// Apply the directive to the notebook.
    pub fn render(&self, notebook: &mut Notebook) -> Result<(), DirectiveError> {
        self.directive.render(notebook, self.payload)
    }
}

/// Convert spans into nodes, resolving directive keys against `registry`.
///
/// Comments that are not shaped like directives stay as text. Directives
/// with an unknown key are logged and also stay as text, so documents using
/// directives this build does not know about still convert.
pub(crate) fn build<'a>(
    source: &'a str,
    spans: &[Span],
    registry: &'a DirectiveRegistry,
) -> Vec<Node<'a>> {
    spans
        .iter()
        .map(|&span| match span.kind {
            SpanKind::Text => Node::Text(TextNode::new(span, source)),
            SpanKind::Comment => resolve_comment(span, source, registry),
        })
        .collect()
}

fn resolve_comment<'a>(span: Span, source: &'a str, registry: &'a DirectiveRegistry) -> Node<'a> {
    let Some(parsed) = parse_comment(span.slice(source)) else {
        return Node::Text(TextNode::new(span, source));
    };

    match registry.get(parsed.key) {
        Some(directive) => Node::Directive(DirectiveNode {
            start: span.start,
            end: span.end,
            key: parsed.key,
            payload: parsed.payload,
            directive,
        }),
        None => {
            warn!(
                key = parsed.key,
                start = span.start,
                end = span.end,
                "Unknown directive key, keeping comment as text"
            );
            Node::Text(TextNode::new(span, source))
        }
    }
}

/// Merge every run of consecutive text nodes into a single node.
///
/// Directive nodes are never merged and separate text runs.
pub(crate) fn optimize(nodes: Vec<Node<'_>>) -> Vec<Node<'_>> {
    let mut optimized: Vec<Node<'_>> = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            Node::Text(text) => {
                if let Some(Node::Text(prev)) = optimized.last_mut() {
                    prev.append(text);
                } else {
                    optimized.push(Node::Text(text));
                }
            }
            directive @ Node::Directive(_) => optimized.push(directive),
        }
    }

    optimized
}
