//! `<!-- author:[...] -->` directive.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::{Directive, DirectiveError, decode};
use crate::notebook::Notebook;

/// Side length of the rendered avatar in pixels.
const AVATAR_SIZE: u32 = 48;

/// Notebook author as written in an `author:` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Profile link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Free-form description (contact, affiliation, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

/// Author list directive.
///
/// Renders the authors into a single markup cell. This is a forward-only
/// directive: templates generated from notebooks never contain it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorDirective;

impl Directive for AuthorDirective {
    fn key(&self) -> &str {
        "author"
    }

    fn render(&self, notebook: &mut Notebook, payload: &str) -> Result<(), DirectiveError> {
        let authors: Vec<Author> = decode(payload)?;
        if authors.is_empty() {
            return Ok(());
        }
        notebook.push_markup(render_authors(&authors));
        Ok(())
    }
}

/// Render the author block as markdown.
fn render_authors(authors: &[Author]) -> String {
    let mut md = String::from("#### Authors\n");

    for author in authors {
        md.push('\n');

        if let Some(avatar) = non_empty(author.avatar.as_deref()) {
            let _ = write!(
                md,
                "<img src=\"{}\" alt=\"{}\" width=\"{AVATAR_SIZE}\" height=\"{AVATAR_SIZE}\" /> ",
                escape(avatar),
                escape(&author.name)
            );
        }

        let name = escape_markdown(&author.name);
        match non_empty(author.link.as_deref()) {
            Some(link) => {
                let _ = writeln!(md, "**[{name}]({})**", link_target(link));
            }
            None => {
                let _ = writeln!(md, "**{name}**");
            }
        }

        if let Some(about) = non_empty(author.about.as_deref()) {
            let _ = writeln!(md, "\n{about}");
        }
    }

    md.truncate(md.trim_end().len());
    md
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Backslash-escape characters that would start inline markdown syntax.
fn escape_markdown(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Percent-encode the characters that end a link destination early.
fn link_target(url: &str) -> String {
    url.replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
        .replace('<', "%3C")
        .replace('>', "%3E")
}

fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::{CellKind, MARKDOWN_LANGUAGE_ID};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_author() {
        let mut notebook = Notebook::new();
        AuthorDirective
            .render(
                &mut notebook,
                r#"[{"name":"Ann","avatar":"https://example.com/a.png","link":"https://example.com/ann","about":"Email: ann@example.com"}]"#,
            )
            .unwrap();

        let cell = &notebook.cells[0];
        assert_eq!(cell.kind, CellKind::Markup);
        assert_eq!(cell.language_id, MARKDOWN_LANGUAGE_ID);
        assert_eq!(
            cell.content,
            "#### Authors\n\n\
             <img src=\"https://example.com/a.png\" alt=\"Ann\" width=\"48\" height=\"48\" /> \
             **[Ann](https://example.com/ann)**\n\n\
             Email: ann@example.com"
        );
    }

    #[test]
    fn test_name_only_authors() {
        let mut notebook = Notebook::new();
        AuthorDirective
            .render(&mut notebook, r#"[{"name":"Ann"},{"name":"Bob","link":""}]"#)
            .unwrap();
        assert_eq!(
            notebook.cells[0].content,
            "#### Authors\n\n**Ann**\n\n**Bob**"
        );
    }

    #[test]
    fn test_empty_list_adds_no_cell() {
        let mut notebook = Notebook::new();
        AuthorDirective.render(&mut notebook, "[]").unwrap();
        assert!(notebook.cells.is_empty());
    }

    #[test]
    fn test_object_payload_rejected() {
        let mut notebook = Notebook::new();
        let err = AuthorDirective
            .render(&mut notebook, r#"{"name":"Ann"}"#)
            .unwrap_err();
        assert!(matches!(err, DirectiveError::Decode(_)));
    }

    #[test]
    fn test_avatar_attributes_escaped() {
        let md = render_authors(&[Author {
            name: "A \"Q\" <B>".to_owned(),
            avatar: Some("https://x/a.png?a=1&b=2".to_owned()),
            ..Author::default()
        }]);
        assert!(md.contains("src=\"https://x/a.png?a=1&amp;b=2\""));
        assert!(md.contains("alt=\"A &quot;Q&quot; &lt;B&gt;\""));
    }

    #[test]
    fn test_name_markdown_escaped() {
        let md = render_authors(&[
            Author {
                name: "A*B [x]".to_owned(),
                ..Author::default()
            },
            Author {
                name: "snake_case `dev`".to_owned(),
                link: Some("https://example.com/wiki/A_(b) c".to_owned()),
                ..Author::default()
            },
        ]);
        assert_eq!(
            md,
            "#### Authors\n\n\
             **A\\*B \\[x\\]**\n\n\
             **[snake\\_case \\`dev\\`](https://example.com/wiki/A_%28b%29%20c)**"
        );
    }
}
