//! # Error Types
//!
//! Errors raised while encoding or decoding shared types.

use thiserror::Error;

/// Canonical codec failures.
///
/// Any decode failure of transaction bytes is reported to the host as
/// `EncodingError`; a decode failure of persisted bytes means the store
/// is corrupted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Serialization failed (includes exceeding the size limit).
    #[error("Encode failed: {0}")]
    Encode(String),

    /// Bytes are not a valid encoding of the expected type.
    #[error("Decode failed: {0}")]
    Decode(String),
}
