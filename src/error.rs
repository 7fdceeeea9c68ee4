// src/error.rs

//! Error types for python-dev-config

use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or publishing a Python environment
#[derive(Error, Debug)]
pub enum Error {
    /// The interpreter could not be run, or what it reported is not a
    /// usable development environment
    #[error("Python development environment not usable: {0}")]
    EnvironmentUnusable(String),

    /// Recipe or probe output could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// File I/O failed
    #[error("I/O error: {0}")]
    IoError(String),

    /// An option or setting override was malformed or unknown
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    /// Shorthand for an unusable-environment error
    pub fn unusable(msg: impl Into<String>) -> Self {
        Self::EnvironmentUnusable(msg.into())
    }

    /// Whether this error means the interpreter environment cannot be used
    pub fn is_unusable(&self) -> bool {
        matches!(self, Self::EnvironmentUnusable(_))
    }
}
