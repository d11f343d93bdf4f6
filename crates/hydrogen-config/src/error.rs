use std::io;

use thiserror::Error;

/// Configuration error type.
///
/// Only load-fatal conditions are represented here. Per-field problems
/// (missing env vars, out-of-range numbers) fall back to defaults and are
/// surfaced through the log, never through this type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly named configuration file could not be read.
    #[error("failed to read config file at {path}: {source}")]
    Read {
        /// Path to the config file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration document is not valid JSON. The source error
    /// carries the line and column of the first problem.
    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        /// Path to the config file that failed to parse.
        path: String,
        /// Underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but its shape is unusable (e.g. the top level is
    /// not an object).
    #[error("invalid config document at {path}: {message}")]
    Invalid {
        /// Path to the offending config file.
        path: String,
        /// Description of the structural problem.
        message: String,
    },

    /// A section loader rejected its subtree. The whole load is discarded.
    #[error("invalid {section} section: {message}")]
    Section {
        /// Name of the section that failed.
        section: &'static str,
        /// Description of the rejection.
        message: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
