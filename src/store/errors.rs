//! Store-specific error types.
//!
//! These errors represent failures in the storage layer and carry no
//! knowledge of the binding protocol. The handler layer wraps them with
//! operation context before surfacing them to the reconciliation loop.

use std::fmt;
use std::time::Duration;

/// Errors that can occur during store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The object does not exist (update path; `get` reports a miss as `None`).
    NotFound { namespace: String, name: String },

    /// An object already exists under this key (create path).
    AlreadyExists { namespace: String, name: String },

    /// Optimistic concurrency failure: the caller's copy is stale.
    Conflict {
        namespace: String,
        name: String,
        expected: Option<String>,
        actual: Option<String>,
    },

    /// The object is structurally unusable (e.g. missing identity metadata).
    InvalidObject { message: String },

    /// The store is temporarily unavailable.
    Unavailable {
        message: String,
        retry_after: Option<Duration>,
    },

    /// The request context's deadline passed before the operation ran.
    Timeout { operation: String },

    /// Encoding or decoding an object failed.
    Serialization { message: String },

    /// Generic internal store error.
    Internal {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { namespace, name } => {
                write!(f, "object not found: {}/{}", namespace, name)
            }
            StoreError::AlreadyExists { namespace, name } => {
                write!(f, "object already exists: {}/{}", namespace, name)
            }
            StoreError::Conflict {
                namespace,
                name,
                expected,
                actual,
            } => match (expected, actual) {
                (Some(expected), Some(actual)) => {
                    write!(
                        f,
                        "conflict on {}/{}: expected version {}, found {}",
                        namespace, name, expected, actual
                    )
                }
                _ => write!(f, "conflict on {}/{}", namespace, name),
            },
            StoreError::InvalidObject { message } => {
                write!(f, "invalid object: {}", message)
            }
            StoreError::Unavailable {
                message,
                retry_after,
            } => {
                if let Some(duration) = retry_after {
                    write!(f, "store unavailable: {} (retry after {:?})", message, duration)
                } else {
                    write!(f, "store unavailable: {}", message)
                }
            }
            StoreError::Timeout { operation } => {
                write!(f, "deadline exceeded during {}", operation)
            }
            StoreError::Serialization { message } => {
                write!(f, "serialization error: {}", message)
            }
            StoreError::Internal { message, .. } => {
                write!(f, "internal store error: {}", message)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Internal { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl StoreError {
    /// Create a new NotFound error.
    pub fn not_found(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Create a new AlreadyExists error.
    pub fn already_exists(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Create a new Conflict error with the versions that disagreed.
    pub fn conflict(
        namespace: impl Into<String>,
        name: impl Into<String>,
        expected: Option<String>,
        actual: Option<String>,
    ) -> Self {
        Self::Conflict {
            namespace: namespace.into(),
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Create a new InvalidObject error.
    pub fn invalid_object(message: impl Into<String>) -> Self {
        Self::InvalidObject {
            message: message.into(),
        }
    }

    /// Create a new Unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            retry_after: None,
        }
    }

    /// Create a new Timeout error for the named operation.
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Create a new Serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a new Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Check if this error indicates the object was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Check if this error indicates a conflict (exists or stale write).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            StoreError::AlreadyExists { .. } | StoreError::Conflict { .. }
        )
    }

    /// Check if this error is a temporary failure that might succeed on retry.
    pub fn is_temporary(&self) -> bool {
        matches!(
            self,
            StoreError::Unavailable { .. } | StoreError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let error = StoreError::not_found("ops", "cluster-abc123");
        assert_eq!(error.to_string(), "object not found: ops/cluster-abc123");

        let error = StoreError::already_exists("ops", "cluster-abc123");
        assert_eq!(
            error.to_string(),
            "object already exists: ops/cluster-abc123"
        );

        let error = StoreError::conflict(
            "ops",
            "cluster-abc123",
            Some("2".to_string()),
            Some("1".to_string()),
        );
        assert_eq!(
            error.to_string(),
            "conflict on ops/cluster-abc123: expected version 2, found 1"
        );

        let error = StoreError::timeout("get");
        assert_eq!(error.to_string(), "deadline exceeded during get");
    }

    #[test]
    fn test_store_error_classifiers() {
        let not_found = StoreError::not_found("ops", "x");
        assert!(not_found.is_not_found());
        assert!(!not_found.is_conflict());
        assert!(!not_found.is_temporary());

        let exists = StoreError::already_exists("ops", "x");
        assert!(exists.is_conflict());
        assert!(!exists.is_not_found());

        let conflict = StoreError::conflict("ops", "x", None, None);
        assert!(conflict.is_conflict());

        let timeout = StoreError::timeout("update");
        assert!(timeout.is_temporary());
        assert!(!timeout.is_conflict());
    }
}
