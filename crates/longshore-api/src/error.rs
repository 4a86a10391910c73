//! Platform API error types.

use thiserror::Error;

/// Errors signaled by the platform API layer.
///
/// These are the "remote-layer failures" the identifier resolver promises to
/// pass through untouched; none of them is ever reinterpreted as a
/// not-found or ambiguous resolution outcome.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured platform URL is unusable.
    #[error("invalid platform URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as configured.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to set up HTTP client")]
    Setup(#[source] reqwest::Error),

    /// The request never produced an HTTP response.
    #[error("request to {url} failed")]
    Transport {
        /// The request URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The platform answered with a non-success status.
    #[error("{url} returned HTTP {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The request URL.
        url: String,
        /// Message extracted from the platform's error body, or the raw
        /// body when no structured message was present.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response from {url}")]
    Decode {
        /// The request URL.
        url: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_display() {
        let err = ApiError::InvalidUrl {
            url: "ftp://api".into(),
            reason: "must start with http:// or https://".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid platform URL 'ftp://api': must start with http:// or https://"
        );
    }

    #[test]
    fn status_display_carries_url_and_message() {
        let err = ApiError::Status {
            status: 500,
            url: "https://api/api/v1/container/".into(),
            message: "boom".into(),
        };
        assert_eq!(
            err.to_string(),
            "https://api/api/v1/container/ returned HTTP 500: boom"
        );
    }
}
