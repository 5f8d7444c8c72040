//! Error types for mediactl
//!
//! The orchestrator itself never returns errors to its callers; these types
//! cover the seams around it (sound loading, persistence, configuration and
//! the HTTP surface).

use thiserror::Error;

/// Main error type for the mediactl crate
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Sound asset could not be prepared for playback
    #[error("Sound load error: {0}")]
    Load(String),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from the shared library
    #[error(transparent)]
    Common(#[from] mediactl_common::Error),
}

/// Convenience Result type using mediactl Error
pub type Result<T> = std::result::Result<T, Error>;
