//! `celli new` command implementation.

use std::path::{Path, PathBuf};

use celli_config::{CliSettings, Config};
use clap::Args;
use tracing::info;

use crate::error::CliError;
use crate::output::Output;
use crate::scaffold::{self, BookType};

/// Arguments for the new command.
#[derive(Args)]
pub(crate) struct NewArgs {
    /// Type of the notebook template to create.
    book_type: BookType,

    /// Output file or directory (default: configured file name in the
    /// current directory).
    #[arg(short, long, visible_aliases = ["dest", "dst"], default_value = ".")]
    output: PathBuf,

    /// Author name (overrides config).
    #[arg(long)]
    author_name: Option<String>,

    /// Author profile link (overrides config).
    #[arg(long)]
    author_link: Option<String>,

    /// Author avatar URL (overrides config).
    #[arg(long)]
    author_avatar: Option<String>,

    /// Author description (overrides config).
    #[arg(long)]
    author_about: Option<String>,
}

impl NewArgs {
    /// Execute the new command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            author_name: self.author_name,
            author_link: self.author_link,
            author_avatar: self.author_avatar,
            author_about: self.author_about,
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let created = chrono::Utc::now().format("%d %b %Y").to_string();
        let destination = create_template(self.book_type, &self.output, &config, &created)?;

        output.success(&format!(
            "Created {} template at {}",
            self.book_type,
            destination.display()
        ));
        Ok(())
    }
}

/// Write the starter template and return the path it was written to.
fn create_template(
    book_type: BookType,
    output: &Path,
    config: &Config,
    created: &str,
) -> Result<PathBuf, CliError> {
    let author = scaffold::author_from_config(&config.author);
    let markup = scaffold::render(book_type, &author, created)
        .map_err(|err| CliError::Validation(format!("could not render template: {err}")))?;

    let destination = resolve_destination(output, &config.template.filename);
    info!(path = %destination.display(), %book_type, "Writing template");
    std::fs::write(&destination, markup).map_err(|source| CliError::Write {
        path: destination.clone(),
        source,
    })?;
    Ok(destination)
}

/// Append `filename` when `output` is an existing directory.
fn resolve_destination(output: &Path, filename: &str) -> PathBuf {
    if output.is_dir() {
        output.join(filename)
    } else {
        output.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celli_notebook::MarkupParser;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_destination_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_destination(temp_dir.path(), "template.md"),
            temp_dir.path().join("template.md")
        );
    }

    #[test]
    fn test_resolve_destination_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("java.md");
        assert_eq!(resolve_destination(&file, "template.md"), file);
    }

    #[test]
    fn test_create_template_in_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.author.name = Some("Ann".to_owned());
        config.template.filename = "book.md".to_owned();

        let destination =
            create_template(BookType::JavaBook, temp_dir.path(), &config, "1 Jan 2026").unwrap();

        assert_eq!(destination, temp_dir.path().join("book.md"));
        let markup = std::fs::read_to_string(&destination).unwrap();
        let notebook = MarkupParser::with_builtins().parse_str(&markup).unwrap();
        assert_eq!(notebook.metadata["created"], "1 Jan 2026");
        assert_eq!(notebook.cells[0].content, "#### Authors\n\n**Ann**");
    }

    #[test]
    fn test_create_template_overwrites_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("java.md");
        std::fs::write(&file, "old content that is longer than nothing").unwrap();

        create_template(BookType::JavaBook, &file, &Config::default(), "today").unwrap();

        let markup = std::fs::read_to_string(&file).unwrap();
        assert!(markup.starts_with("<!-- notebook:"));
        assert!(!markup.contains("old content"));
    }

    #[test]
    fn test_create_template_missing_parent_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("missing/java.md");

        let err = create_template(BookType::JavaBook, &file, &Config::default(), "today")
            .unwrap_err();

        assert!(matches!(err, CliError::Write { path, .. } if path == file));
    }
}
