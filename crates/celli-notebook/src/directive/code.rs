//! `<!-- code:{...} -->` directive.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::payload::escape_close;
use super::{Directive, DirectiveError, decode};
use crate::fetch::ContentFetcher;
use crate::notebook::{Cell, Notebook, to_tab_indented};

/// Payload of a code directive.
#[derive(Debug, Deserialize)]
struct CodePayload {
    lang: String,
    #[serde(default)]
    meta: Option<Map<String, Value>>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    uri: Option<String>,
}

/// Code cell as written back into a template.
#[derive(Serialize)]
struct CodeComment<'a> {
    lang: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<&'a Map<String, Value>>,
    #[serde(skip_serializing_if = "str::is_empty")]
    content: &'a str,
}

/// Code cell directive.
///
/// Payload: `{"lang": "...", "meta"?: {...}, "content"?: "...", "uri"?: "..."}`.
///
/// When `uri` is set, the cell content is loaded from it and replaces any
/// inline `content`: `file://` URIs are read from the local file system,
/// anything else is fetched with an HTTP GET.
pub struct CodeDirective {
    fetcher: ContentFetcher,
}

impl Default for CodeDirective {
    fn default() -> Self {
        Self::new(ContentFetcher::default())
    }
}

impl CodeDirective {
    /// Create a code directive resolving URIs with `fetcher`.
    #[must_use]
    pub fn new(fetcher: ContentFetcher) -> Self {
        Self { fetcher }
    }
}

impl Directive for CodeDirective {
    fn key(&self) -> &str {
        "code"
    }

    fn render(&self, notebook: &mut Notebook, payload: &str) -> Result<(), DirectiveError> {
        let CodePayload {
            lang,
            meta,
            content,
            uri,
        } = decode(payload)?;

        let content = match uri.as_deref().filter(|uri| !uri.is_empty()) {
            Some(uri) => self.fetcher.fetch(uri)?,
            None => content.unwrap_or_default(),
        };

        let meta = meta.filter(|meta| !meta.is_empty());
        notebook.push_code(lang, content, meta);
        Ok(())
    }
}

/// Build the `code:` comment for a code cell.
pub(crate) fn code_comment(cell: &Cell) -> serde_json::Result<String> {
    let payload = to_tab_indented(&CodeComment {
        lang: &cell.language_id,
        meta: cell.metadata.as_ref().filter(|meta| !meta.is_empty()),
        content: &cell.content,
    })?;
    Ok(format!("<!-- code:{} -->", escape_close(&payload)))
}
