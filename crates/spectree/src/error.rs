//! Error types surfaced by configuration loading and reporters.

use std::io;

use thiserror::Error;

/// Errors raised while reading [`SuiteConfig`](crate::SuiteConfig) from the
/// environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value '{value}' for {variable}, expected {expected}")]
    InvalidValue {
        /// Name of the offending environment variable.
        variable: &'static str,
        /// Raw value that failed to parse.
        value: String,
        /// Description of the accepted values.
        expected: &'static str,
    },
}

/// Errors raised while writing or forwarding reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing report output failed.
    #[error("failed to write report output: {0}")]
    Io(#[from] io::Error),
    /// Serialising a report event failed.
    #[error("failed to serialise report event: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The remote reporting server could not be reached.
    #[error("failed to connect to reporting server at {host}: {source}")]
    Connect {
        /// Address that was dialled.
        host: String,
        /// Underlying connection failure.
        #[source]
        source: io::Error,
    },
}
