//! Comment scanner.
//!
//! Splits markdown into text and HTML comment spans. The spans cover the
//! whole source in order with no gaps and no overlaps, so every byte of the
//! input belongs to exactly one span.

/// Opening delimiter of an HTML comment.
pub const COMMENT_OPEN: &str = "<!--";

/// Closing delimiter of an HTML comment.
pub const COMMENT_CLOSE: &str = "-->";

/// Kind of a scanned span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Plain markdown text.
    Text,
    /// A complete `<!-- ... -->` comment, delimiters included.
    Comment,
}

/// Byte range of the source tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Text or comment.
    pub kind: SpanKind,
}

impl Span {
    fn text(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            kind: SpanKind::Text,
        }
    }

    fn comment(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            kind: SpanKind::Comment,
        }
    }

    /// The slice of `source` covered by this span.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Scan `source` into text and comment spans.
///
/// A comment is the shortest `<!--` ... `-->` substring. An opening
/// delimiter without a matching close is plain text. Zero-length spans are
/// never produced, so an empty source yields no spans and a source without
/// comments yields exactly one text span.
///
/// # Example
///
/// ```
/// use celli_notebook::scanner::{scan, SpanKind};
///
/// let spans = scan("a<!-- br: -->b");
/// let kinds: Vec<_> = spans.iter().map(|s| s.kind).collect();
/// assert_eq!(kinds, [SpanKind::Text, SpanKind::Comment, SpanKind::Text]);
/// ```
#[must_use]
pub fn scan(source: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(offset) = source[pos..].find(COMMENT_OPEN) {
        let start = pos + offset;
        let body = start + COMMENT_OPEN.len();
        let Some(close) = source[body..].find(COMMENT_CLOSE) else {
            // Unterminated comment: the rest is text
            break;
        };
        let end = body + close + COMMENT_CLOSE.len();

        if start > pos {
            spans.push(Span::text(pos, start));
        }
        spans.push(Span::comment(start, end));
        pos = end;
    }

    if pos < source.len() {
        spans.push(Span::text(pos, source.len()));
    }

    spans
}

/// Line number (1-indexed) of the byte at `offset`.
#[must_use]
pub fn line_number(source: &str, offset: usize) -> usize {
    source.as_bytes()[..offset.min(source.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_covers(source: &str, spans: &[Span]) {
        let mut pos = 0;
        for span in spans {
            assert_eq!(span.start, pos, "gap or overlap before {span:?}");
            assert!(span.end > span.start, "empty span {span:?}");
            pos = span.end;
        }
        assert_eq!(pos, source.len());
    }

    #[test]
    fn test_no_comments_single_text_span() {
        let source = "# Title\n\nSome text.";
        let spans = scan(source);
        assert_eq!(spans, vec![Span::text(0, source.len())]);
    }

    #[test]
    fn test_empty_source() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_comment_between_text() {
        let source = "Hello\n<!-- br: -->\nBye";
        let spans = scan(source);
        assert_eq!(
            spans,
            vec![Span::text(0, 6), Span::comment(6, 18), Span::text(18, 22)]
        );
        assert_eq!(spans[1].slice(source), "<!-- br: -->");
        assert_covers(source, &spans);
    }

    #[test]
    fn test_leading_and_trailing_comment() {
        let source = "<!-- a: -->text<!-- b: -->";
        let spans = scan(source);
        assert_eq!(
            spans,
            vec![Span::comment(0, 11), Span::text(11, 15), Span::comment(15, 26)]
        );
    }

    #[test]
    fn test_adjacent_comments() {
        let source = "<!-- a: --><!-- b: -->";
        let spans = scan(source);
        assert_eq!(spans, vec![Span::comment(0, 11), Span::comment(11, 22)]);
    }

    #[test]
    fn test_comment_is_non_greedy() {
        let source = "<!-- a --> x <!-- b -->";
        let spans = scan(source);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].slice(source), "<!-- a -->");
        assert_eq!(spans[2].slice(source), "<!-- b -->");
    }

    #[test]
    fn test_unterminated_comment_is_text() {
        let source = "before <!-- code:{\"lang\":\"go\"} never closed";
        let spans = scan(source);
        assert_eq!(spans, vec![Span::text(0, source.len())]);
    }

    #[test]
    fn test_unterminated_after_complete_comment() {
        let source = "<!-- br: --> tail <!-- open";
        let spans = scan(source);
        assert_eq!(spans, vec![Span::comment(0, 12), Span::text(12, source.len())]);
    }

    #[test]
    fn test_empty_comment() {
        let spans = scan("<!---->");
        assert_eq!(spans, vec![Span::comment(0, 7)]);
    }

    #[test]
    fn test_multiline_comment_with_multibyte_text() {
        let source = "héllo <!-- code:{\n\t\"lang\": \"go\"\n} --> wörld";
        let spans = scan(source);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].slice(source), "héllo ");
        assert_eq!(spans[2].slice(source), " wörld");
        assert_covers(source, &spans);
    }

    #[test]
    fn test_line_number() {
        let source = "a\nb\nc";
        assert_eq!(line_number(source, 0), 1);
        assert_eq!(line_number(source, 2), 2);
        assert_eq!(line_number(source, 4), 3);
        assert_eq!(line_number(source, 100), 3);
    }
}
