use reqwest::StatusCode;
use thiserror::Error;

/// Transport-level failure talking to the registry dashboard API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{what} returned status {status}")]
    Status { what: String, status: StatusCode },
}

impl ApiError {
    pub fn status(what: impl Into<String>, status: StatusCode) -> Self {
        ApiError::Status {
            what: what.into(),
            status,
        }
    }
}

/// Catalog refresh failure; stale data (if any) stays visible
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to refresh catalog: {0}")]
    Api(#[from] ApiError),

    /// A newer refresh was issued before this one resolved; the response
    /// was discarded without touching the snapshot. Callers treat this as
    /// a no-op, never as an operator-facing error.
    #[error("refresh superseded by a newer request")]
    Superseded,
}

/// Deletion workflow failure. No destructive call is ever issued unless
/// the manifest resolved to a non-empty digest first.
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("failed to resolve manifest: {0}")]
    ResolveFailed(#[source] ApiError),

    #[error("manifest has no digest")]
    MissingDigest,

    #[error("registry rejected deletion: {0}")]
    DeleteRejected(#[source] ApiError),
}
