//! # Remote Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  EmptyResponse          │ │
//! │  │  InvalidUrl     │  │  Rejected       │  │  Deserialize            │ │
//! │  │                 │  │                 │  │  InvalidRow             │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors returned by [`RemoteClient`](crate::RemoteClient).
#[derive(Debug, Error)]
pub enum RemoteError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid remote configuration.
    #[error("Invalid remote configuration: {0}")]
    InvalidConfig(String),

    /// The backend URL does not parse or is not http(s).
    #[error("Invalid remote URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    ///
    /// ## When This Occurs
    /// - Row-level security refused the write (401/403)
    /// - A column constraint failed (400/409)
    /// - The backend is down (5xx)
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// A representation was requested but none came back.
    ///
    /// ## When This Occurs
    /// - Updating an id that no longer exists remotely
    #[error("Empty response for {context}")]
    EmptyResponse { context: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A row that deserialized but cannot become a location.
    #[error("Invalid row {id}: {reason}")]
    InvalidRow { id: i64, reason: String },
}

impl From<url::ParseError> for RemoteError {
    fn from(err: url::ParseError) -> Self {
        RemoteError::InvalidUrl(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl RemoteError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(self, RemoteError::InvalidConfig(_) | RemoteError::InvalidUrl(_))
    }

    /// Returns true if reissuing the same request might succeed.
    ///
    /// Nothing retries automatically; the shell uses this to word its
    /// notification.
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteError::Http(e) => e.is_timeout() || e.is_connect(),
            RemoteError::Rejected { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorization() {
        assert!(RemoteError::InvalidConfig("no key".into()).is_config_error());
        assert!(RemoteError::InvalidUrl("ftp://x".into()).is_config_error());

        let unavailable = RemoteError::Rejected {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(unavailable.is_transient());
        assert!(!unavailable.is_config_error());

        let forbidden = RemoteError::Rejected {
            status: 403,
            message: "new row violates row-level security policy".into(),
        };
        assert!(!forbidden.is_transient());
    }

    #[test]
    fn test_display() {
        let err = RemoteError::Rejected {
            status: 400,
            message: "invalid input syntax".into(),
        };
        assert_eq!(err.to_string(), "Request rejected (400): invalid input syntax");
    }
}
