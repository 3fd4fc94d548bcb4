//! Error types for the file-backed parts of the simulation.
//!
//! The tick loop itself never fails; only configuration loading and
//! high-score persistence touch the filesystem.

use std::path::PathBuf;

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `GameConfig`.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of its allowed range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Offending field name
        field: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// High-score persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum HighScoreError {
    /// High-score file could not be written.
    #[error("failed to write high score to {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
