//! Error types for manifests, config files, and report output.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Errors raised while reading a `<host> slots=<N>` manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest contains no hosts")]
    Empty,

    #[error("line {line}: missing slot annotation in {text:?}")]
    MissingSlots { line: usize, text: String },

    #[error("line {line}: invalid slot count {value:?}")]
    InvalidSlots { line: usize, value: String },

    #[error("line {line}: slots={found} differs from slots={expected} on the first line")]
    MismatchedSlots {
        line: usize,
        expected: u32,
        found: u32,
    },

    #[error("invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading `nodebisect.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type alias for report output.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors raised while persisting or serializing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
