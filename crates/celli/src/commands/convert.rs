//! `celli convert` command implementation.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use celli_config::{CliSettings, Config};
use celli_notebook::{ContentFetcher, DirectiveRegistry, markup_to_notebook, notebook_to_markup};
use clap::{Args, Subcommand};
use tracing::info;

use super::write_stdout;
use crate::error::CliError;

/// Conversion between notebooks and templates.
#[derive(Subcommand)]
pub(crate) enum ConvertCommand {
    /// Convert a notebook file to a template, written to stdout.
    #[command(name = "book2tpl", visible_alias = "b2t")]
    BookToTemplate(BookToTemplateArgs),
    /// Convert a template file to a notebook, written to stdout.
    #[command(name = "tpl2book", visible_alias = "t2b")]
    TemplateToBook(TemplateToBookArgs),
}

/// Arguments for `convert book2tpl`.
#[derive(Args)]
pub(crate) struct BookToTemplateArgs {
    /// Path to the notebook file.
    path: PathBuf,
}

/// Arguments for `convert tpl2book`.
#[derive(Args)]
pub(crate) struct TemplateToBookArgs {
    /// Path to the template file.
    path: PathBuf,

    /// Pretty JSON output for the notebook document.
    #[arg(short, long)]
    pretty: bool,

    /// HTTP timeout in seconds for `uri` fetches (overrides config).
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

impl ConvertCommand {
    /// Execute the convert command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        match self {
            ConvertCommand::BookToTemplate(args) => write_stdout(&book_to_template(&args.path)?),
            ConvertCommand::TemplateToBook(args) => {
                let cli_settings = args.cli_settings();
                let config = Config::load(config_path, Some(&cli_settings))?;
                write_stdout(&template_to_book(&args.path, &config)?)
            }
        }
    }
}

impl TemplateToBookArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            pretty: self.pretty.then_some(true),
            timeout_secs: self.timeout,
            ..Default::default()
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Convert the notebook at `path` to template markdown.
fn book_to_template(path: &Path) -> Result<String, CliError> {
    info!(path = %path.display(), "Converting notebook to template");
    Ok(notebook_to_markup(open(path)?)?)
}

/// Convert the template at `path` to notebook JSON.
fn template_to_book(path: &Path, config: &Config) -> Result<String, CliError> {
    info!(path = %path.display(), "Converting template to notebook");
    let fetcher = match config.fetch.timeout() {
        Some(timeout) => ContentFetcher::with_timeout(timeout),
        None => ContentFetcher::default(),
    };
    let notebook = markup_to_notebook(open(path)?, DirectiveRegistry::with_builtins(fetcher))?;
    Ok(notebook.to_json(config.convert.pretty)?)
}
