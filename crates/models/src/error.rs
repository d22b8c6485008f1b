//! Error types shared by backend accessors and the composition engine.

use thiserror::Error;

/// Errors a backend accessor can surface.
///
/// The composition engine isolates these per backend: a failing source
/// stops contributing, the composed sequence keeps flowing.
#[derive(Error, Debug)]
pub enum BackendError {
    /// A single-shot lookup failed
    #[error("Backend lookup failed: {0}")]
    Lookup(String),

    /// A live result sequence errored mid-stream
    #[error("Backend stream failed: {0}")]
    Stream(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
