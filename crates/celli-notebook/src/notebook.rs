//! Notebook document model.

use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::NotebookError;

/// Language identifier of every markup cell.
pub const MARKDOWN_LANGUAGE_ID: &str = "markdown";

/// Kind of a notebook cell.
///
/// Serialized as an integer: `1` for markup, `2` for code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CellKind {
    /// Markdown content meant for display.
    Markup,
    /// Source code that can be executed.
    Code,
}

impl From<CellKind> for u8 {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Markup => 1,
            CellKind::Code => 2,
        }
    }
}

impl TryFrom<u8> for CellKind {
    type Error = UnknownCellKind;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Markup),
            2 => Ok(Self::Code),
            other => Err(UnknownCellKind(other)),
        }
    }
}

/// Cell kind value outside of the known range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown cell kind {0} (expected 1 for markup or 2 for code)")]
pub struct UnknownCellKind(pub u8);

/// A single notebook cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Language of the cell content (`markdown` for markup cells).
    pub language_id: String,
    /// Cell body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Markup or code.
    pub kind: CellKind,
    /// Optional per-cell metadata.
    #[serde(default, skip_serializing_if = "is_none_or_empty")]
    pub metadata: Option<Map<String, Value>>,
}

impl Cell {
    /// Create a markup cell.
    pub fn markup(content: impl Into<String>) -> Self {
        Self {
            language_id: MARKDOWN_LANGUAGE_ID.to_owned(),
            content: content.into(),
            kind: CellKind::Markup,
            metadata: None,
        }
    }

    /// Create a code cell.
    pub fn code(
        language_id: impl Into<String>,
        content: impl Into<String>,
        metadata: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            language_id: language_id.into(),
            content: content.into(),
            kind: CellKind::Code,
            metadata,
        }
    }
}

/// Read an explicit `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn is_none_or_empty(metadata: &Option<Map<String, Value>>) -> bool {
    metadata.as_ref().is_none_or(Map::is_empty)
}

/// Notebook document: ordered cells plus document-level metadata.
///
/// Metadata keys are kept sorted, so serializing the same notebook twice
/// always yields the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Cells in document order.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub cells: Vec<Cell>,
    /// Document metadata.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub metadata: Map<String, Value>,
}

impl Notebook {
    /// Create an empty notebook.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a markup cell.
    pub fn push_markup(&mut self, content: impl Into<String>) {
        self.cells.push(Cell::markup(content));
    }

    /// Append a code cell.
    pub fn push_code(
        &mut self,
        language_id: impl Into<String>,
        content: impl Into<String>,
        metadata: Option<Map<String, Value>>,
    ) {
        self.cells.push(Cell::code(language_id, content, metadata));
    }

    /// Insert metadata entries, overwriting existing keys.
    pub fn merge_metadata(&mut self, entries: Map<String, Value>) {
        for (key, value) in entries {
            self.metadata.insert(key, value);
        }
    }

    /// Parse a notebook from JSON text.
    pub fn from_json(json: &str) -> Result<Self, NotebookError> {
        serde_json::from_str(json).map_err(NotebookError::ParseNotebook)
    }

    /// Read and parse a notebook from a JSON stream.
    pub fn from_reader<R: Read>(mut source: R) -> Result<Self, NotebookError> {
        let mut json = String::new();
        source
            .read_to_string(&mut json)
            .map_err(NotebookError::ReadNotebook)?;
        Self::from_json(&json)
    }

    /// Serialize to JSON, compact or tab-indented.
    pub fn to_json(&self, pretty: bool) -> Result<String, NotebookError> {
        let json = if pretty {
            to_tab_indented(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(NotebookError::Serialize)
    }
}

/// Serialize a value as JSON indented with tabs.
pub(crate) fn to_tab_indented<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_cell_kind_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&CellKind::Markup).unwrap(), "1");
        assert_eq!(serde_json::to_string(&CellKind::Code).unwrap(), "2");
    }

    #[test]
    fn test_unknown_cell_kind_rejected() {
        let err = serde_json::from_str::<CellKind>("3").unwrap_err();
        assert!(err.to_string().contains("unknown cell kind 3"));
    }

    #[test]
    fn test_notebook_json_shape() {
        let mut notebook = Notebook::new();
        notebook.push_markup("# Title");
        notebook.push_code(
            "java",
            "int x = 1;",
            Some(json!({"readonly": true}).as_object().unwrap().clone()),
        );
        notebook.merge_metadata(json!({"version": "1.0"}).as_object().unwrap().clone());

        let value: Value = serde_json::from_str(&notebook.to_json(false).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "cells": [
                    {"languageId": "markdown", "content": "# Title", "kind": 1},
                    {
                        "languageId": "java",
                        "content": "int x = 1;",
                        "kind": 2,
                        "metadata": {"readonly": true}
                    }
                ],
                "metadata": {"version": "1.0"}
            })
        );
    }

    #[test]
    fn test_empty_notebook_serializes_to_empty_object() {
        assert_eq!(Notebook::new().to_json(false).unwrap(), "{}");
    }

    #[test]
    fn test_empty_cell_metadata_is_omitted() {
        let cell = Cell::code("go", "", Some(Map::new()));
        let json = serde_json::to_string(&cell).unwrap();
        assert!(!json.contains("metadata"));
    }

    #[test]
    fn test_pretty_json_uses_tabs() {
        let mut notebook = Notebook::new();
        notebook.push_markup("hi");
        let json = notebook.to_json(true).unwrap();
        assert!(json.starts_with("{\n\t\"cells\": [\n\t\t{"));
    }

    #[test]
    fn test_merge_metadata_last_write_wins() {
        let mut notebook = Notebook::new();
        notebook.merge_metadata(json!({"version": "1.0", "a": 1}).as_object().unwrap().clone());
        notebook.merge_metadata(json!({"version": "2.0"}).as_object().unwrap().clone());
        assert_eq!(notebook.metadata["version"], "2.0");
        assert_eq!(notebook.metadata["a"], 1);
    }

    #[test]
    fn test_from_json_defaults() {
        let notebook =
            Notebook::from_json(r#"{"cells":[{"languageId":"markdown","kind":1}]}"#).unwrap();
        assert_eq!(notebook.cells, vec![Cell::markup("")]);
        assert!(notebook.metadata.is_empty());
    }

    #[test]
    fn test_from_json_accepts_null_fields() {
        let notebook = Notebook::from_json(
            r#"{"cells":[{"languageId":"go","content":null,"kind":2,"metadata":null}],"metadata":null}"#,
        )
        .unwrap();
        assert_eq!(notebook.cells, vec![Cell::code("go", "", None)]);
        assert!(notebook.metadata.is_empty());

        let notebook = Notebook::from_json(r#"{"cells":null}"#).unwrap();
        assert_eq!(notebook, Notebook::new());
    }

    #[test]
    fn test_from_reader_invalid_json() {
        let err = Notebook::from_reader("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, NotebookError::ParseNotebook(_)));
    }
}
