//! Error types for vault storage and metadata resolution.

use thiserror::Error;

/// Errors raised by the vault's persistent store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level error type surfaced by the command layer.
///
/// `NotFound`, `NoExactMatch` and `VerificationFailed` are expected,
/// user-facing outcomes; `Transport` means the remote API was unreachable or
/// returned something unparseable. Callers must be able to tell the two
/// classes apart, so transport failures are never folded into `NotFound`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No results found for '{0}'")]
    NotFound(String),

    #[error("No hit for '{title}' matches year {year} exactly")]
    NoExactMatch { title: String, year: String },

    #[error("Director mismatch: expected a name containing '{expected}', record says '{actual}'")]
    VerificationFailed { expected: String, actual: String },

    #[error("Metadata API unreachable: {0}")]
    Transport(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InputError(String),
}
