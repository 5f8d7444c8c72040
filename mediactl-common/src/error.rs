//! Common error types for mediactl

use thiserror::Error;

/// Common result type for mediactl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared across the mediactl crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
