//! Error types for notebook conversion.

use std::fmt;

use crate::directive::DirectiveError;

/// Position of a directive comment in the markdown source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Byte offset of the opening `<!--`.
    pub start: usize,
    /// Byte offset just past the closing `-->`.
    pub end: usize,
    /// Line of the opening `<!--` (1-indexed).
    pub line: usize,
}

impl Location {
    /// Locate the byte range `start..end` within `source`.
    pub(crate) fn new(source: &str, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            line: crate::scanner::line_number(source, start),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {}:{} (line {})", self.start, self.end, self.line)
    }
}

/// Error from a notebook conversion.
///
/// Conversions are all-or-nothing: when any of these is returned, no partial
/// notebook or template is produced.
#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    /// The markdown input could not be read.
    #[error("could not read markdown source")]
    ReadMarkup(#[source] std::io::Error),

    /// The notebook input could not be read.
    #[error("could not read notebook source")]
    ReadNotebook(#[source] std::io::Error),

    /// The notebook input is not a valid notebook document.
    #[error("could not parse notebook content")]
    ParseNotebook(#[source] serde_json::Error),

    /// A directive payload failed to decode.
    #[error("could not decode `{key}` payload at {location}")]
    PayloadDecode {
        /// Directive key.
        key: String,
        /// Where the directive comment sits in the source.
        location: Location,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A directive handler failed while building the notebook.
    #[error("could not render notebook: `{key}` directive at {location} failed")]
    Render {
        /// Directive key.
        key: String,
        /// Where the directive comment sits in the source.
        location: Location,
        /// Underlying handler error.
        #[source]
        source: DirectiveError,
    },

    /// A markup cell opens an HTML comment it never closes.
    ///
    /// Written out as is, the comment would swallow the cell separator that
    /// follows and merge the cell into its neighbour on the way back.
    #[error("markup cell {cell} contains an unclosed `<!--`")]
    UnclosedComment {
        /// Index of the offending cell.
        cell: usize,
    },

    /// The notebook or template could not be serialized.
    #[error("could not serialize notebook data")]
    Serialize(#[source] serde_json::Error),
}

impl NotebookError {
    /// Attach a directive failure to the comment it came from.
    pub(crate) fn directive(key: &str, location: Location, err: DirectiveError) -> Self {
        match err {
            DirectiveError::Decode(source) => Self::PayloadDecode {
                key: key.to_owned(),
                location,
                source,
            },
            source => Self::Render {
                key: key.to_owned(),
                location,
                source,
            },
        }
    }
}
