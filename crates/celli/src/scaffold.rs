//! Starter templates for `celli new`.

use std::fmt;
use std::str::FromStr;

use celli_config::AuthorConfig;
use celli_notebook::directive::Author;
use serde_json::json;

/// Author name used when neither configuration nor `$USER` provides one.
const ANONYMOUS: &str = "Anonymous";

/// Kind of notebook a template is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BookType {
    /// Java programming notebook.
    JavaBook,
}

impl BookType {
    /// Every supported book type.
    pub(crate) fn all() -> &'static [BookType] {
        &[BookType::JavaBook]
    }

    /// Name used on the command line.
    pub(crate) fn name(self) -> &'static str {
        match self {
            BookType::JavaBook => "javabook",
        }
    }

    fn title(self) -> &'static str {
        match self {
            BookType::JavaBook => "Java Book",
        }
    }

    fn language(self) -> &'static str {
        match self {
            BookType::JavaBook => "java",
        }
    }

    fn asset(self) -> &'static str {
        match self {
            BookType::JavaBook => include_str!("../assets/javabook.md"),
        }
    }
}

impl fmt::Display for BookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Requested book type is not supported.
#[derive(Debug, thiserror::Error)]
#[error("unsupported template type `{0}` (supported: {supported})", supported = supported_names())]
pub(crate) struct UnknownBookType(String);

fn supported_names() -> String {
    BookType::all()
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for BookType {
    type Err = UnknownBookType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookType::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBookType(s.to_owned()))
    }
}

/// Build the template author from configuration.
///
/// The name falls back to `$USER`, then to a fixed placeholder.
pub(crate) fn author_from_config(config: &AuthorConfig) -> Author {
    let name = non_empty(config.name.clone())
        .or_else(|| non_empty(std::env::var("USER").ok()))
        .unwrap_or_else(|| ANONYMOUS.to_owned());

    Author {
        name,
        avatar: non_empty(config.avatar.clone()),
        link: non_empty(config.link.clone()),
        about: non_empty(config.about.clone()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Render the starter template for `book_type`.
///
/// `created` is written into the notebook metadata as is.
pub(crate) fn render(
    book_type: BookType,
    author: &Author,
    created: &str,
) -> Result<String, serde_json::Error> {
    let notebook = json!({
        "type": book_type.name(),
        "title": book_type.title(),
        "language": book_type.language(),
        "created": created,
    });
    let authors = serde_json::to_string(&[author])?;

    Ok(book_type
        .asset()
        .replace("{{notebook}}", &comment_safe(&serde_json::to_string(&notebook)?))
        .replace("{{author}}", &comment_safe(&authors))
        .replace("{{title}}", book_type.title()))
}

/// Keep a JSON payload from closing its comment early.
fn comment_safe(json: &str) -> String {
    json.replace("-->", "--\\u003e")
}
