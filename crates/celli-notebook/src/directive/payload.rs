//! Directive comment parsing.
//!
//! Decomposes `<!-- key:payload -->` into its key and payload. The payload
//! boundary is found by tracking bracket depth, skipping over JSON string
//! literals, so nested objects and strings containing brackets are sliced
//! correctly.

use crate::scanner::{COMMENT_CLOSE, COMMENT_OPEN};

/// A comment that has the shape of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedComment<'a> {
    /// Directive key (text before the colon).
    pub key: &'a str,
    /// Bracket-delimited payload, or empty when absent.
    pub payload: &'a str,
}

/// Parse a complete comment (delimiters included) as a directive.
///
/// Returns `None` if the comment is not shaped like `key:` optionally
/// followed by a single `{...}` or `[...]` structure.
pub(crate) fn parse_comment(comment: &str) -> Option<ParsedComment<'_>> {
    let inner = comment
        .strip_prefix(COMMENT_OPEN)?
        .strip_suffix(COMMENT_CLOSE)?
        .trim();

    let key_end = inner.find(|c: char| !is_key_char(c)).unwrap_or(inner.len());
    if key_end == 0 {
        return None;
    }
    let (key, rest) = inner.split_at(key_end);
    let rest = rest.strip_prefix(':')?.trim_start();

    if rest.is_empty() {
        return Some(ParsedComment { key, payload: "" });
    }

    let end = structure_end(rest)?;
    if !rest[end..].trim().is_empty() {
        return None;
    }

    Some(ParsedComment {
        key,
        payload: &rest[..end],
    })
}

/// Make a serialized JSON payload safe to embed in a comment.
///
/// `-->` can only occur inside JSON string literals, where `--\u003e` decodes
/// to the same text.
pub(crate) fn escape_close(json: &str) -> String {
    json.replace(COMMENT_CLOSE, "--\\u003e")
}

/// Valid key characters: alphanumerics, hyphens and underscores.
fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Find the end of the bracketed structure at the start of `s`.
///
/// Returns the byte offset just past the matching closing bracket, or
/// `None` if `s` does not start with `{`/`[`, brackets are mismatched, or the
/// structure is never closed.
fn structure_end(s: &str) -> Option<usize> {
    if !s.starts_with(['{', '[']) {
        return None;
    }

    let mut expected = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => expected.push('}'),
            '[' => expected.push(']'),
            '}' | ']' => {
                if expected.pop() != Some(c) {
                    return None;
                }
                if expected.is_empty() {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}
