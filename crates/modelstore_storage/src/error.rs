//! Error types for storage operations.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
///
/// A failed operation leaves the store unchanged.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No record exists under the requested identity.
    #[error("id '{id}' not found")]
    NotFound {
        /// The identity that was looked up.
        id: String,
    },

    /// The identity cannot be interpreted in the backend's key encoding.
    #[error("invalid identity '{id}': {reason}")]
    InvalidIdentity {
        /// The identity as supplied by the caller.
        id: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The backing service could not be reached at construction time.
    #[error("backend unavailable: {message}")]
    BackendUnavailable {
        /// Description of the connectivity failure.
        message: String,
    },

    /// An update targeted an identity but matched or modified nothing.
    #[error("item '{id}' not updated, matched count {matched}, modification count {modified}")]
    UpdateNotApplied {
        /// The identity the update targeted.
        id: String,
        /// Documents matched by the filter.
        matched: u64,
        /// Documents actually modified.
        modified: u64,
    },

    /// The backend reported a failure while executing an operation.
    #[error("backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid backend configuration.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },
}

impl StorageError {
    /// Creates a not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates an invalid identity error.
    pub fn invalid_identity(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentity {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a backend unavailable error.
    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
        }
    }

    /// Creates an update not applied error.
    pub fn update_not_applied(id: impl Into<String>, matched: u64, modified: u64) -> Self {
        Self::UpdateNotApplied {
            id: id.into(),
            matched,
            modified,
        }
    }

    /// Wraps a backend-specific error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if this is a [`StorageError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the identity this error refers to, if it carries one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::NotFound { id }
            | Self::InvalidIdentity { id, .. }
            | Self::UpdateNotApplied { id, .. } => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_id() {
        let err = StorageError::not_found("99");
        assert!(err.is_not_found());
        assert_eq!(err.id(), Some("99"));
        assert!(err.to_string().contains("'99'"));
    }

    #[test]
    fn update_not_applied_display() {
        let err = StorageError::update_not_applied("abc", 1, 0);
        let msg = err.to_string();
        assert!(msg.contains("matched count 1"));
        assert!(msg.contains("modification count 0"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn backend_keeps_source() {
        let io = std::io::Error::other("socket closed");
        let err = StorageError::backend(io);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.id(), None);
    }
}
