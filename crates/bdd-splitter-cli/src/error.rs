//! Errors raised before any feature file is touched.
//!
//! These are the failures a user fixes by changing the invocation, so the
//! binary reports them with a distinct exit code. Everything that happens
//! while processing documents flows through `eyre` instead.

use std::path::PathBuf;

use bdd_splitter::tags::TagExprError;
use thiserror::Error;

/// Configuration and argument errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// An environment variable or flag held an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The `--tags` expression did not parse.
    #[error("invalid --tags expression: {0}")]
    InvalidTagExpression(#[from] TagExprError),

    /// The source location could not be listed.
    #[error("cannot read source location {}: {source}", path.display())]
    Discovery {
        /// Location passed on the command line.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Whether the error stems from the invocation rather than the inputs.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_) | Self::InvalidTagExpression(_)
        )
    }
}
