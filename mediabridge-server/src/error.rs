//! Error types for mediabridge-server
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Failures detected inside an executing task are never surfaced
//! through this type; they are reported through the client notifier instead.

use thiserror::Error;

/// Main error type for mediabridge-server
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Native pipeline creation or wiring errors
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Playback engine errors
    #[error("Playback error: {0}")]
    Playback(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using mediabridge-server Error
pub type Result<T> = std::result::Result<T, Error>;
