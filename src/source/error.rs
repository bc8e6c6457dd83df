//! Error type shared by the external-source traits.

use thiserror::Error;

/// Errors that can occur when calling an external source.
///
/// A timed-out outbound call is reported as [`SourceError::Unavailable`]
/// by the client implementation; the core performs no retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// The upstream call failed or timed out.
    #[error("upstream call failed: {0}")]
    Unavailable(String),

    /// The upstream answered but returned no usable route.
    #[error("no route between {origin} and {destination}")]
    NoRoute { origin: String, destination: String },

    /// The upstream answered with a payload the client could not use.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
