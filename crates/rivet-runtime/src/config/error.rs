//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found at the specified path.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Failed to extract a typed configuration from the merged sources.
    #[error("invalid configuration: {0}")]
    Extract(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
