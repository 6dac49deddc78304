//! Error types for s3url-core
//!
//! Every failure is terminal for the invocation; the CLI prints the message
//! and exits with status 1.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for s3url-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3url operations
#[derive(Error, Debug)]
pub enum Error {
    /// No bucket after resolving flags and URL
    #[error("Bucket name is required.")]
    MissingBucket,

    /// No object key after resolving flags and URL
    #[error("Object key is required.")]
    MissingKey,

    /// Storage URL could not be decomposed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Expiry outside the range a presigned URL supports
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Upload source could not be opened or read
    #[error("Cannot read {}: {message}", path.display())]
    LocalFile { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication or permission failure reported by the service
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Bucket or object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other failure talking to the service
    #[error("Network error: {0}")]
    Network(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Whether the error was caused by the command line rather than the service
    pub const fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::MissingBucket
                | Error::MissingKey
                | Error::InvalidUrl(_)
                | Error::InvalidDuration(_)
        )
    }
}
