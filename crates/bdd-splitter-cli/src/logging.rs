//! Structured logging set-up.
//!
//! Logs go to stderr so the JSON report on stdout stays machine readable.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn filter_from_config(config: &Config) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Install the global subscriber for `config`.
///
/// Level precedence (highest to lowest):
///
/// 1. `--log-level`
/// 2. `BDD_SPLIT_LOG_LEVEL`
/// 3. `info`
///
/// A subscriber that is already installed is left in place.
pub fn init_logging(config: &Config) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    // The first subscriber wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
