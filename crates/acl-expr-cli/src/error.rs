//! Semantic error types for the command-line front end.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised before or around parsing, as opposed to parse errors in
/// the expression itself.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A names file could not be read.
    #[error("failed to read names file {path}: {source}")]
    NamesFile {
        /// Location of the names file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// A names file was not a JSON object of strings.
    #[error("names file {path} is not a JSON object of token names: {source}")]
    NamesFormat {
        /// Location of the names file.
        path: PathBuf,
        /// Underlying decoding failure.
        source: serde_json::Error,
    },
}
