//! Configuration read from the environment and overridden by flags.
//!
//! Every setting has an environment variable prefixed with `BDD_SPLIT_`;
//! command line flags take precedence over the environment.

use std::env;
use std::str::FromStr;

use bdd_splitter::format::{Formatter, Tidy, Verbatim};

use crate::error::CliError;

/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV: &str = "BDD_SPLIT_LOG_LEVEL";
/// Environment variable selecting the fallback document language.
pub const LANGUAGE_ENV: &str = "BDD_SPLIT_LANGUAGE";
/// Environment variable enabling whitespace tidying of outputs.
pub const TIDY_ENV: &str = "BDD_SPLIT_TIDY";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Info` when not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything, including per-candidate decisions.
    Trace,
    /// Skipped scenarios and substitution no-ops.
    Debug,
    /// One line per written file.
    #[default]
    Info,
    /// Documents that were skipped.
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, CliError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CliError::InvalidConfig(format!(
            "invalid value '{value}' for {name}, expected true or false"
        ))),
    }
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Log verbosity.
    pub log_level: LogLevel,
    /// Language assumed for documents without a `# language:` header.
    pub language: Option<String>,
    /// Tidy whitespace in written files.
    pub tidy: bool,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidConfig`] if a variable holds an invalid
    /// value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Missing variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidConfig`] if a variable holds an invalid
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup(LOG_LEVEL_ENV)
            .map(|value| value.parse::<LogLevel>())
            .transpose()?
            .unwrap_or_default();
        let language = lookup(LANGUAGE_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let tidy = lookup(TIDY_ENV)
            .map(|value| parse_flag(TIDY_ENV, &value))
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            log_level,
            language,
            tidy,
        })
    }

    /// Apply command line overrides on top of environment values.
    ///
    /// `tidy` can only switch tidying on; the environment decides otherwise.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        language: Option<String>,
        tidy: bool,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(language) = language {
            self.language = Some(language);
        }
        self.tidy |= tidy;
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Formatter applied to every written document.
    #[must_use]
    pub fn formatter(&self) -> &'static dyn Formatter {
        if self.tidy { &Tidy } else { &Verbatim }
    }
}
