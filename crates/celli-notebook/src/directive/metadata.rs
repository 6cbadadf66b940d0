//! `<!-- notebook:{...} -->` directive.

use serde_json::{Map, Value};

use super::payload::escape_close;
use super::{Directive, DirectiveError, decode};
use crate::notebook::{Notebook, to_tab_indented};

/// Document metadata directive.
///
/// The payload is a JSON object whose entries are merged into the notebook
/// metadata. Later directives overwrite keys set by earlier ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotebookDirective;

impl Directive for NotebookDirective {
    fn key(&self) -> &str {
        "notebook"
    }

    fn render(&self, notebook: &mut Notebook, payload: &str) -> Result<(), DirectiveError> {
        let entries: Map<String, Value> = decode(payload)?;
        notebook.merge_metadata(entries);
        Ok(())
    }
}

/// Build the `notebook:` comment for document metadata.
pub(crate) fn notebook_comment(metadata: &Map<String, Value>) -> serde_json::Result<String> {
    let payload = to_tab_indented(metadata)?;
    Ok(format!("<!-- notebook:{} -->", escape_close(&payload)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_merges_entries() {
        let mut notebook = Notebook::new();
        NotebookDirective
            .render(&mut notebook, r#"{"version": "1.0", "kernel": {"name": "java"}}"#)
            .unwrap();
        assert_eq!(
            Value::Object(notebook.metadata),
            json!({"version": "1.0", "kernel": {"name": "java"}})
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut notebook = Notebook::new();
        NotebookDirective
            .render(&mut notebook, r#"{"version": "1.0"}"#)
            .unwrap();
        NotebookDirective
            .render(&mut notebook, r#"{"version": "2.0"}"#)
            .unwrap();
        assert_eq!(notebook.metadata["version"], "2.0");
    }

    #[test]
    fn test_rejects_non_object_payload() {
        let mut notebook = Notebook::new();
        let err = NotebookDirective
            .render(&mut notebook, "[1, 2]")
            .unwrap_err();
        assert!(matches!(err, DirectiveError::Decode(_)));
    }

    #[test]
    fn test_rejects_missing_payload() {
        let mut notebook = Notebook::new();
        assert!(NotebookDirective.render(&mut notebook, "").is_err());
    }

    #[test]
    fn test_notebook_comment_format() {
        let metadata = json!({"title": "Intro", "version": 2})
            .as_object()
            .unwrap()
            .clone();
        assert_eq!(
            notebook_comment(&metadata).unwrap(),
            "<!-- notebook:{\n\t\"title\": \"Intro\",\n\t\"version\": 2\n} -->"
        );
    }
}
