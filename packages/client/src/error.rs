//! Error types for the arcterm client.

use thiserror::Error;

/// Client-specific errors.
///
/// No variant is fatal to the process: authorization failures force
/// re-authentication, everything else surfaces as a notice and leaves the
/// last rendered state in place.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credential expired or rejected (any 401-class response, any endpoint)
    #[error("authorization expired")]
    Unauthorized,

    /// Network-level failure (connect, send, read)
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body was not JSON or did not match the expected shape
    #[error("malformed response: {0}")]
    Parse(String),

    /// Token file could not be read or written
    #[error("token store error: {0}")]
    Store(String),
}
