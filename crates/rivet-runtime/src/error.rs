//! Runtime error types.

use thiserror::Error;

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Installing the shutdown signal handler failed.
    #[error("failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
