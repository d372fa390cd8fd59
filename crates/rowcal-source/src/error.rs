//! Error types for source-database operations.

use thiserror::Error;

/// A specialized Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// An error from the source-database collaborator.
///
/// The variants carry a message from the underlying client;
/// [`is_retryable`](SourceError::is_retryable) classifies them for callers
/// that back off and retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// Credentials are missing, invalid, or expired.
    #[error("source authentication failed: {0}")]
    Authentication(String),

    /// Connection failed, timed out, or could not resolve.
    #[error("source network error: {0}")]
    Network(String),

    /// The source rejected the request for rate reasons.
    #[error("source rate limit exceeded: {0}")]
    RateLimited(String),

    /// The source returned a server-side failure.
    #[error("source server error: {0}")]
    Server(String),

    /// The source answered with data the client could not interpret.
    #[error("invalid source response: {0}")]
    InvalidResponse(String),

    /// The referenced database or row does not exist or is not shared.
    #[error("source object not found: {0}")]
    NotFound(String),

    /// Unexpected client-side state.
    #[error("internal source client error: {0}")]
    Internal(String),
}

impl SourceError {
    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a rate limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited(message.into())
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error is transient and the call may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::RateLimited(_) | Self::Server(_)
        )
    }
}
