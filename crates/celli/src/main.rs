//! celli CLI - notebook templates.
//!
//! Provides commands for:
//! - `new`: Create a starter template for a notebook type
//! - `convert book2tpl`: Convert a notebook to a markdown template
//! - `convert tpl2book`: Convert a markdown template to a notebook
//! - `version`: Print the application version

mod commands;
mod error;
mod output;
mod scaffold;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertCommand, NewArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// celli - work with notebooks in the easiest way.
#[derive(Parser)]
#[command(name = "celli", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover celli.toml).
    #[arg(short, long, global = true, env = "CELLI_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new notebook template.
    #[command(visible_aliases = ["n", "create"])]
    New(NewArgs),
    /// Convert a notebook to a template or a template to a notebook.
    #[command(subcommand, visible_aliases = ["c", "transform"])]
    Convert(ConvertCommand),
    /// Print the application version.
    Version,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::New(args) => args.execute(config_path),
        Commands::Convert(cmd) => cmd.execute(config_path),
        Commands::Version => commands::version::execute(VERSION),
    };

    if let Err(err) = result {
        output.error_chain(&err);
        std::process::exit(1);
    }
}
