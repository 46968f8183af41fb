//! Typed errors for the fetch node.
//!
//! Uses `thiserror` for library errors (not `anyhow`); the binary wraps
//! these with context.

use thiserror::Error;

/// Errors surfaced by a single node invocation.
///
/// Any of these aborts the invocation as a whole and leaves the state
/// untouched.
#[derive(Debug, Error)]
pub enum FetchNodeError {
    /// None of the input expression's alternatives is present in the state
    #[error("input key missing from state: {key}")]
    InputKeyMissing { key: String },

    /// The input value exists but is not a string
    #[error("input value for {key} is not a string")]
    InvalidInput { key: String },

    /// Static fetch or browser render failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The cleaner rejected the markup
    #[error("cleanup failed: {0}")]
    Cleanup(#[from] CleanupError),

    /// Document could not be written to the state
    #[error("state serialization error: {0}")]
    State(#[from] serde_json::Error),

    /// Node could not be constructed
    #[error("config error: {reason}")]
    Config { reason: String },
}

impl FetchNodeError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

/// A failed acquisition of a remote URL.
#[derive(Debug, Error)]
#[error("fetch failed for {url}: {cause}")]
pub struct FetchError {
    /// URL that was being fetched or rendered
    pub url: String,

    /// What went wrong
    #[source]
    pub cause: FetchCause,
}

impl FetchError {
    pub fn new(url: impl Into<String>, cause: FetchCause) -> Self {
        Self {
            url: url.into(),
            cause,
        }
    }

    /// HTTP status code, when the failure was a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self.cause {
            FetchCause::Status(code) => Some(code),
            _ => None,
        }
    }

    /// Whether the failure was a timeout on the HTTP call or browser session.
    pub fn is_timeout(&self) -> bool {
        matches!(self.cause, FetchCause::Timeout)
    }
}

/// Underlying reason for a [`FetchError`].
#[derive(Debug, Error)]
pub enum FetchCause {
    /// Server answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Request or navigation exceeded its time budget
    #[error("timed out")]
    Timeout,

    /// Network-level failure (DNS, connection refused, TLS, body read)
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Reference looked like a URL but does not parse as one
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Browser session failed (launch, crash, script error)
    #[error("render failed: {0}")]
    Render(String),
}

/// Errors raised by a [`Cleaner`](crate::traits::cleaner::Cleaner).
#[derive(Debug, Error)]
pub enum CleanupError {
    /// Nothing readable was left after cleanup
    #[error("no text content found in markup")]
    NoContent,

    /// Cleaner refused the input
    #[error("markup rejected: {reason}")]
    Rejected { reason: String },
}

/// Result type alias for node operations.
pub type Result<T> = std::result::Result<T, FetchNodeError>;

/// Result type alias for fetch capabilities.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for cleanup operations.
pub type CleanupResult<T> = std::result::Result<T, CleanupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_carries_url_and_status() {
        let err = FetchError::new("https://example.com/missing", FetchCause::Status(404));

        assert_eq!(err.status(), Some(404));
        assert!(!err.is_timeout());
        assert_eq!(
            err.to_string(),
            "fetch failed for https://example.com/missing: HTTP status 404"
        );
    }

    #[test]
    fn test_timeout_has_no_status() {
        let err = FetchError::new("https://example.com", FetchCause::Timeout);

        assert_eq!(err.status(), None);
        assert!(err.is_timeout());
    }

    #[test]
    fn test_node_error_is_transparent_over_fetch_error() {
        let err: FetchNodeError =
            FetchError::new("https://example.com", FetchCause::Status(500)).into();

        assert_eq!(
            err.to_string(),
            "fetch failed for https://example.com: HTTP status 500"
        );
    }
}
