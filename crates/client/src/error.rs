//! Transport error types.

use thiserror::Error;

/// Errors from a single fetch against the tracking service.
///
/// None of these are fatal to the core: a failed fetch leaves that device's
/// view stale and the refresh loop moves on.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Tracking service URL not configured")]
    NotConfigured,

    #[error("Request timeout after {0}s")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Tracking service returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}
