//! Error types for the terminal frontend.

use thiserror::Error;

/// Errors produced by the terminal frontend.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal I/O error.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// The supplied approval request could not be read.
    #[error("invalid approval request: {0}")]
    Request(String),
}

/// Convenience alias.
pub type FrontendResult<T> = Result<T, FrontendError>;
