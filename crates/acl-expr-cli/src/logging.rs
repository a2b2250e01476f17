//! Structured logging on stderr.
//!
//! Output on stdout is reserved for command results, so diagnostics from
//! both this crate (`tracing`) and the parser (`log`) go to stderr.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. `--log-level`
/// 2. `ACL_EXPR_LOG_LEVEL`
/// 3. `warn`
///
/// Records emitted through the `log` facade are forwarded to the same
/// subscriber. If a global subscriber is already installed the call does
/// nothing; the first one wins.
pub fn init_logging(config: &CliConfig) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish()
        .try_init();
    if installed.is_err() {
        tracing::trace!("global subscriber already installed");
    }
}
