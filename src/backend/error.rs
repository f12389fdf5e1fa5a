//! Error types for chat backends.

use thiserror::Error;

/// A reply could not be obtained. All variants are treated alike by the
/// send pipeline.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Transport failure (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {0}")]
    Status(u16),

    /// The success body did not match `{ "response": string }`.
    #[error("malformed response body: {0}")]
    Decode(String),
}
