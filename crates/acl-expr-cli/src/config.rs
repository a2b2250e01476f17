//! Front-end configuration parsed from environment variables.
//!
//! Every setting can be supplied through an `ACL_EXPR_`-prefixed
//! environment variable and overridden by the matching command-line flag.

use std::env;
use std::str::FromStr;

use acl_expr::{DEFAULT_MAX_DEPTH, ParseOptions};

use crate::error::CliError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "ACL_EXPR_LOG_LEVEL";
/// Environment variable holding the nesting ceiling.
pub const MAX_DEPTH_VAR: &str = "ACL_EXPR_MAX_DEPTH";

/// How much of the parser's reasoning `acl-expr` reports on stderr.
///
/// Every level also reports what the quieter levels listed after it report.
/// The default, `Warn`, keeps a successful run silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// How each token was classified: operator keyword or recipient kind.
    Trace,
    /// Configuration and names-file loading, plus a one-line summary of
    /// every parsed tree.
    Debug,
    /// Why `check` rejected an expression.
    Info,
    /// A count of invalid tokens whenever lexing fails.
    #[default]
    Warn,
    /// Nothing beyond the command's own error report.
    Error,
}

/// Accepted spellings, in the order listed by error messages.
const LEVEL_NAMES: [(&str, LogLevel); 5] = [
    ("trace", LogLevel::Trace),
    ("debug", LogLevel::Debug),
    ("info", LogLevel::Info),
    ("warn", LogLevel::Warn),
    ("error", LogLevel::Error),
];

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = if wanted == "warning" { "warn" } else { wanted.as_str() };
        LEVEL_NAMES
            .iter()
            .find_map(|&(name, level)| (name == wanted).then_some(level))
            .ok_or_else(|| {
                let known: Vec<&str> = LEVEL_NAMES.iter().map(|&(name, _)| name).collect();
                CliError::InvalidConfig(format!(
                    "unknown log level '{s}', expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    #[must_use]
    pub const fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for one invocation of the `acl-expr` binary.
///
/// # Environment Variables
///
/// - `ACL_EXPR_LOG_LEVEL`: trace, debug, info, warn or error
/// - `ACL_EXPR_MAX_DEPTH`: deepest expression nesting accepted, at least 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level written to stderr.
    pub log_level: LogLevel,
    /// Nesting ceiling handed to the parser.
    pub max_depth: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value. Missing variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };

        let max_depth = match lookup(MAX_DEPTH_VAR) {
            Some(val) => parse_max_depth(&val)?,
            None => DEFAULT_MAX_DEPTH,
        };

        Ok(Self {
            log_level,
            max_depth,
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// Command-line flags take precedence over environment-based values.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>, max_depth: Option<usize>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(depth) = max_depth {
            self.max_depth = depth;
        }

        self
    }

    /// Parser limits derived from this configuration.
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default().with_max_depth(self.max_depth)
    }
}

/// Parse a nesting ceiling, rejecting zero and non-numeric text.
///
/// # Errors
///
/// Returns `CliError::InvalidConfig` describing the accepted range.
pub fn parse_max_depth(value: &str) -> Result<usize, CliError> {
    match value.trim().parse::<usize>() {
        Ok(depth) if depth > 0 => Ok(depth),
        _ => Err(CliError::InvalidConfig(format!(
            "invalid max depth '{value}', expected a positive integer"
        ))),
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("DEBUG", LogLevel::Debug)]
    #[case("Info", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] text: &str, #[case] expected: LogLevel) {
        assert_eq!(text.parse::<LogLevel>().ok(), Some(expected));
        assert_eq!(
            expected.as_filter_str().parse::<LogLevel>().ok(),
            Some(expected)
        );
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let err = "loud".parse::<LogLevel>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: unknown log level 'loud', \
             expected one of: trace, debug, info, warn, error"
        );
    }

    #[test]
    fn every_listed_level_names_its_own_filter() {
        for (name, level) in LEVEL_NAMES {
            assert_eq!(level.as_filter_str(), name);
        }
        assert_eq!(" Warning ".parse::<LogLevel>().ok(), Some(LogLevel::Warn));
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = CliConfig::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn variables_override_defaults() {
        let config = CliConfig::from_lookup(lookup_in(&[
            (LOG_LEVEL_VAR, "debug"),
            (MAX_DEPTH_VAR, "8"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.parse_options().max_depth(), 8);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("deep")]
    fn rejects_unusable_depths(#[case] value: &str) {
        let err = CliConfig::from_lookup(lookup_in(&[(MAX_DEPTH_VAR, value)])).unwrap_err();
        assert!(err.to_string().contains("positive integer"), "{err}");
    }

    #[test]
    fn apply_overrides_updates_selected_fields() {
        let config = CliConfig::default().apply_overrides(Some(LogLevel::Error), Some(3));
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.max_depth, 3);

        let config = CliConfig::default().apply_overrides(None, None);
        assert_eq!(config, CliConfig::default());
    }
}
