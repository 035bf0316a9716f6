//! Command line front end for `bdd-splitter`.
//!
//! The `bdd-split` binary reads feature files from disk, runs the splitting
//! pipeline and writes one file per scenario. It can also concretise a
//! one-row scenario outline in place.
//!
//! # Configuration
//!
//! Settings come from the environment and can be overridden by flags:
//!
//! - `BDD_SPLIT_LOG_LEVEL` / `--log-level`: log verbosity (trace, debug,
//!   info, warn, error)
//! - `BDD_SPLIT_LANGUAGE` / `--language`: language for documents without a
//!   `# language:` header
//! - `BDD_SPLIT_TIDY` / `--tidy`: tidy whitespace in written files

pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
