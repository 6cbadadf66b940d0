//! Pluggable directive handlers.
//!
//! A directive is an HTML comment of the form `<!-- key:payload -->` where
//! `payload` is empty or a JSON object/array. Each key is served by a
//! [`Directive`] implementation registered in a [`DirectiveRegistry`].
//!
//! # Built-in directives
//!
//! | Key        | Handler               | Effect                                     |
//! |------------|-----------------------|--------------------------------------------|
//! | `code`     | [`CodeDirective`]     | appends a code cell, optionally fetched    |
//! | `br`       | [`BrDirective`]       | none; separates consecutive markup cells   |
//! | `notebook` | [`NotebookDirective`] | merges keys into document metadata         |
//! | `author`   | [`AuthorDirective`]   | appends a markup cell listing the authors  |
//!
//! # Example
//!
//! ```
//! use celli_notebook::{Directive, DirectiveError, DirectiveRegistry, MarkupParser, Notebook};
//!
//! struct TodoDirective;
//!
//! impl Directive for TodoDirective {
//!     fn key(&self) -> &str { "todo" }
//!
//!     fn render(&self, notebook: &mut Notebook, payload: &str) -> Result<(), DirectiveError> {
//!         let items: Vec<String> = celli_notebook::directive::decode(payload)?;
//!         let list: Vec<String> = items.iter().map(|item| format!("- [ ] {item}")).collect();
//!         notebook.push_markup(list.join("\n"));
//!         Ok(())
//!     }
//! }
//!
//! let registry = DirectiveRegistry::new().with(TodoDirective);
//! let notebook = MarkupParser::new(registry)
//!     .parse_str("<!-- todo:[\"write docs\"] -->")
//!     .unwrap();
//! assert_eq!(notebook.cells[0].content, "- [ ] write docs");
//! ```

mod author;
mod br;
mod code;
mod metadata;
mod payload;
mod registry;

pub use author::{Author, AuthorDirective};
pub use br::BrDirective;
pub use code::CodeDirective;
pub use metadata::NotebookDirective;
pub use registry::DirectiveRegistry;

pub(crate) use br::BR_COMMENT;
pub(crate) use code::code_comment;
pub(crate) use metadata::notebook_comment;
pub(crate) use payload::parse_comment;

use serde::Deserialize;

use crate::fetch::FetchError;
use crate::notebook::Notebook;

/// Handler for one directive key.
///
/// Handlers receive the raw payload text and are responsible for all
/// notebook mutation the directive implies. They must not keep state between
/// calls: a single handler instance may serve many conversions.
pub trait Directive: Send + Sync {
    /// Directive key matched against `<!-- key:... -->`.
    fn key(&self) -> &str;

    /// Apply the directive to the notebook being built.
    ///
    /// `payload` is the raw text after the colon, trimmed; it is empty when
    /// the directive carries no body.
    fn render(&self, notebook: &mut Notebook, payload: &str) -> Result<(), DirectiveError>;
}

/// Error raised by a directive handler.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    /// The payload is not valid for this directive.
    #[error("invalid payload")]
    Decode(#[from] serde_json::Error),

    /// Referenced content could not be fetched.
    #[error("could not read URI content")]
    Fetch(#[from] FetchError),
}

/// Decode a JSON payload.
///
/// An empty payload is decoded as JSON `null`, so optional payload types
/// accept directives written without a body.
pub fn decode<'de, T: Deserialize<'de>>(payload: &'de str) -> Result<T, DirectiveError> {
    let payload = if payload.is_empty() { "null" } else { payload };
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_object() {
        let value: serde_json::Value = decode(r#"{"a": 1}"#).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_decode_empty_payload_as_null() {
        let value: Option<Vec<u8>> = decode("").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_decode_empty_payload_required_type_fails() {
        let result: Result<Vec<u8>, _> = decode("");
        assert!(matches!(result, Err(DirectiveError::Decode(_))));
    }
}
