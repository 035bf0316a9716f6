//! `bdd-split` binary.
//!
//! Exits with 2 for invalid configuration or arguments and 1 when a command
//! fails.

use bdd_splitter_cli::cli::{Cli, run};
use bdd_splitter_cli::config::Config;
use bdd_splitter_cli::error::CliError;
use bdd_splitter_cli::logging::init_logging;
use clap::Parser;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&Config::default());
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);
    debug!(version = env!("CARGO_PKG_VERSION"), ?config, "starting bdd-split");

    if let Err(e) = run(&cli.command, &config) {
        let usage = e
            .downcast_ref::<CliError>()
            .is_some_and(CliError::is_usage_error);
        error!(error = %format!("{e:#}"), "bdd-split failed");
        std::process::exit(if usage { 2 } else { 1 });
    }
}
