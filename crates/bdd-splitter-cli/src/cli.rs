//! Command line arguments and dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;

use crate::commands::{concretize, split};
use crate::config::{Config, LogLevel};
use crate::error::CliError;

/// Split Gherkin feature files into one document per scenario.
#[derive(Parser, Debug)]
#[command(name = "bdd-split", version, about)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Language assumed for documents without a `# language:` header.
    #[arg(long, global = true, value_name = "CODE")]
    pub language: Option<String>,

    /// Tidy whitespace in written files.
    #[arg(long, global = true)]
    pub tidy: bool,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write one feature file per scenario, with each outline row on its own.
    Split(SplitArgs),
    /// Rewrite a feature file in place, substituting its one-row outline.
    Concretize(ConcretizeArgs),
}

/// Arguments of `split`.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// A feature file, or a directory searched recursively.
    pub source: PathBuf,
    /// Directory receiving the generated files; created if missing.
    pub out_dir: PathBuf,
    /// Tag expression selecting scenarios, e.g. `@smoke and not @wip`.
    #[arg(long, value_name = "EXPR")]
    pub tags: Option<String>,
    /// Substitute placeholders in single-row outlines.
    #[arg(long)]
    pub substitute: bool,
    /// Print a JSON report of written files to stdout.
    #[arg(long)]
    pub json: bool,
}

/// Arguments of `concretize`.
#[derive(Args, Debug)]
pub struct ConcretizeArgs {
    /// Feature file to rewrite.
    pub file: PathBuf,
}

impl Cli {
    /// Configuration from the environment with this invocation's flags on
    /// top.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidConfig`] for invalid environment values.
    pub fn config(&self) -> Result<Config, CliError> {
        Ok(Config::from_env()?.apply_overrides(self.log_level, self.language.clone(), self.tidy))
    }
}

/// Run the selected command.
///
/// # Errors
///
/// Returns an error when the command cannot complete. Usage problems are
/// reported as [`CliError`] values inside the report.
pub fn run(command: &Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Split(args) => {
            split(config, args)?;
        }
        Commands::Concretize(args) => {
            concretize(config, args)?;
        }
    }
    Ok(())
}
