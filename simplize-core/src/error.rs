//! Error types for simplize

use thiserror::Error;

/// Main error type for simplize operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid mesh topology: {0}")]
    Topology(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for simplize operations
pub type Result<T> = std::result::Result<T, Error>;
