//! Error types for Linear Bulk.
//!
//! Two layers of errors live here:
//!
//! - [`SourceError`] is raised by a remote list source (HTTP, GraphQL,
//!   decoding, deadline). The cache treats it as opaque.
//! - [`BulkCacheError`] is what lookups return. It is either a transport
//!   failure captured while populating a category, or a per-lookup miss.
//!
//! # Example
//!
//! ```
//! use linear_bulk_core::{BulkCacheError, Category, SourceError};
//!
//! let miss = BulkCacheError::not_found(Category::Labels, "lbl-42");
//! assert!(miss.is_not_found());
//! assert_eq!(miss.to_string(), "label not found in bulk cache: lbl-42");
//!
//! let failed = BulkCacheError::transport(Category::Teams, SourceError::Cancelled);
//! assert!(failed.is_transport());
//! ```

use std::sync::Arc;

use thiserror::Error;

use crate::category::Category;

/// Errors raised by a remote list source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code returned by the server
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The GraphQL endpoint returned errors in the response envelope.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A request exceeded the caller's deadline.
    #[error("operation timed out after {seconds}s")]
    Timeout {
        /// Deadline that was exceeded, in seconds
        seconds: u64,
    },

    /// The populate routine was dropped before it finished.
    #[error("fetch was cancelled before completion")]
    Cancelled,

    /// The source is misconfigured.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SourceError {
    /// Creates a new request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Creates a new decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Creates an HTTP status error.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Returns true if this is a transient error that might succeed on retry.
    ///
    /// The cache never retries; this is informational for callers deciding
    /// whether a new process run is worthwhile.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(_) | Self::Timeout { .. } | Self::Cancelled => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Errors returned by bulk cache lookups.
///
/// The transport variant holds the source error behind an `Arc` so the same
/// stored failure can be handed to every caller of a poisoned category.
#[derive(Debug, Clone, Error)]
pub enum BulkCacheError {
    /// The category could not be populated. Sticky for the process lifetime.
    #[error("failed to bulk fetch {category}: {source}")]
    Transport {
        /// Category whose populate routine failed
        category: Category,
        /// Underlying source failure
        #[source]
        source: Arc<SourceError>,
    },

    /// The category was populated but does not contain the requested key.
    #[error("{} not found in bulk cache: {key}", category.singular())]
    NotFound {
        /// Category that was searched
        category: Category,
        /// Identifier or key that was requested
        key: String,
    },
}

impl BulkCacheError {
    /// Creates a transport error for the given category.
    pub fn transport(category: Category, source: SourceError) -> Self {
        Self::Transport {
            category,
            source: Arc::new(source),
        }
    }

    /// Creates a not-found error for the given category and key.
    pub fn not_found(category: Category, key: impl Into<String>) -> Self {
        Self::NotFound {
            category,
            key: key.into(),
        }
    }

    /// Returns true if the requested key was absent from a populated category.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the category failed to populate.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns the category this error refers to.
    pub fn category(&self) -> Category {
        match self {
            Self::Transport { category, .. } | Self::NotFound { category, .. } => *category,
        }
    }

    /// Returns the underlying source error for transport failures.
    pub fn source_error(&self) -> Option<&SourceError> {
        match self {
            Self::Transport { source, .. } => Some(source.as_ref()),
            Self::NotFound { .. } => None,
        }
    }
}

/// Type alias for Results with BulkCacheError.
pub type Result<T> = std::result::Result<T, BulkCacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let err = SourceError::http(502, "bad gateway");
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");

        let err = SourceError::GraphQl(vec!["rate limited".into(), "try later".into()]);
        assert_eq!(err.to_string(), "GraphQL errors: rate limited; try later");

        let err = SourceError::Timeout { seconds: 30 };
        assert_eq!(err.to_string(), "operation timed out after 30s");
    }

    #[test]
    fn test_is_transient() {
        assert!(SourceError::request("connection reset").is_transient());
        assert!(SourceError::Timeout { seconds: 5 }.is_transient());
        assert!(SourceError::http(503, "").is_transient());
        assert!(SourceError::http(429, "").is_transient());
        assert!(!SourceError::http(401, "").is_transient());
        assert!(!SourceError::decode("eof").is_transient());
        assert!(!SourceError::GraphQl(vec![]).is_transient());
    }

    #[test]
    fn test_not_found_display() {
        let err = BulkCacheError::not_found(Category::Teams, "ENG");
        assert_eq!(err.to_string(), "team not found in bulk cache: ENG");
        assert!(err.is_not_found());
        assert!(!err.is_transport());
        assert_eq!(err.category(), Category::Teams);
        assert!(err.source_error().is_none());
    }

    #[test]
    fn test_transport_display_and_source() {
        let err = BulkCacheError::transport(Category::Labels, SourceError::http(500, "boom"));
        assert_eq!(
            err.to_string(),
            "failed to bulk fetch issue labels: HTTP 500: boom"
        );
        assert!(err.is_transport());

        use std::error::Error;
        assert!(err.source().is_some());
        assert!(matches!(
            err.source_error(),
            Some(SourceError::Http { status: 500, .. })
        ));
    }

    #[test]
    fn test_clone_shares_source() {
        let err = BulkCacheError::transport(Category::Templates, SourceError::Cancelled);
        let copy = err.clone();

        match (&err, &copy) {
            (
                BulkCacheError::Transport { source: a, .. },
                BulkCacheError::Transport { source: b, .. },
            ) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("Expected transport errors"),
        }
    }
}
