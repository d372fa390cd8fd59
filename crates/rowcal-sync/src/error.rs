//! Sync-layer error taxonomy.
//!
//! Four families of expected failure, per operation contract:
//! - [`SyncError::Auth`]: no caller identity; never retried.
//! - [`SyncError::Validation`]: malformed submission, names the field.
//! - [`SyncError::NotFound`]: the referenced config is absent or not owned.
//! - upstream I/O ([`SyncError::Source`], [`SyncError::Store`],
//!   [`SyncError::Timeout`]): retryable by the caller with backoff; the
//!   engine never retries internally.

use thiserror::Error;

use rowcal_core::ReminderError;
use rowcal_source::SourceError;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors surfaced by sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The caller presented no valid identity.
    #[error("caller is not authenticated")]
    Auth,

    /// The submission was malformed; `field` names the offending input.
    #[error("invalid submission field `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The referenced configuration does not exist or is not owned by
    /// the caller.
    #[error("calendar configuration not found")]
    NotFound,

    /// The source collaborator failed.
    #[error("source failure: {0}")]
    Source(#[from] SourceError),

    /// The persistence collaborator failed.
    #[error("store failure: {message}")]
    Store { message: String, retryable: bool },

    /// A collaborator call exceeded the caller-supplied timeout.
    #[error("upstream call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl SyncError {
    /// Creates a validation error for a named field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns true if the caller may retry this operation with backoff.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Source(e) => e.is_retryable(),
            Self::Store { retryable, .. } => *retryable,
            Self::Timeout { .. } => true,
            Self::Auth | Self::Validation { .. } | Self::NotFound => false,
        }
    }
}

impl From<ReminderError> for SyncError {
    fn from(err: ReminderError) -> Self {
        Self::validation("reminders", err.to_string())
    }
}

/// An error from the persistence collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    /// What went wrong.
    pub message: String,
    /// Whether the caller may retry.
    pub retryable: bool,
}

impl StoreError {
    /// Creates a retryable store error (timeouts, transient I/O).
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a permanent store error.
    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        Self::Store {
            message: err.message,
            retryable: err.retryable,
        }
    }
}
