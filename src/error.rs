//! Error types for provisioning and binding operations.
//!
//! Handler failures carry the resource kind and identity alongside the
//! underlying cause, so the surrounding reconciliation loop can log or retry
//! without re-deriving context. Nothing here is retried internally.

use crate::store::ObjectKey;

/// Boxed underlying cause carried by wrapped handler errors.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for resource handler operations.
///
/// `NotFound` is recoverable and often expected (the caller decides whether
/// to provision); the wrapped variants surface store-layer failures with
/// operation context.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The identity has no backing object
    #[error("{kind} {namespace}/{name} not found")]
    NotFound {
        kind: String,
        namespace: String,
        name: String,
    },

    /// Retrieval failed for a reason other than a clean miss
    #[error("failed to retrieve {kind} {namespace}/{name}: {source}")]
    Lookup {
        kind: String,
        namespace: String,
        name: String,
        #[source]
        source: BoxedCause,
    },

    /// Creation failed, including the already-exists case
    #[error("failed to create {kind} {namespace}/{name}: {source}")]
    Creation {
        kind: String,
        namespace: String,
        name: String,
        #[source]
        source: BoxedCause,
    },

    /// Persisting a status change failed
    #[error("failed to update {kind} {namespace}/{name}: {source}")]
    Update {
        kind: String,
        namespace: String,
        name: String,
        #[source]
        source: BoxedCause,
    },
}

impl HandlerError {
    /// Create a not-found error for the given kind and identity.
    pub fn not_found(kind: impl Into<String>, key: &ObjectKey) -> Self {
        Self::NotFound {
            kind: kind.into(),
            namespace: key.namespace().to_string(),
            name: key.name().to_string(),
        }
    }

    /// Wrap a retrieval failure with the resource identity.
    pub fn lookup(kind: impl Into<String>, key: &ObjectKey, source: impl Into<BoxedCause>) -> Self {
        Self::Lookup {
            kind: kind.into(),
            namespace: key.namespace().to_string(),
            name: key.name().to_string(),
            source: source.into(),
        }
    }

    /// Wrap a creation failure with the resource identity.
    pub fn creation(
        kind: impl Into<String>,
        key: &ObjectKey,
        source: impl Into<BoxedCause>,
    ) -> Self {
        Self::Creation {
            kind: kind.into(),
            namespace: key.namespace().to_string(),
            name: key.name().to_string(),
            source: source.into(),
        }
    }

    /// Wrap an update failure with the resource identity.
    pub fn update(kind: impl Into<String>, key: &ObjectKey, source: impl Into<BoxedCause>) -> Self {
        Self::Update {
            kind: kind.into(),
            namespace: key.namespace().to_string(),
            name: key.name().to_string(),
            source: source.into(),
        }
    }

    /// Check whether this error is a clean miss rather than a store failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The identity the failed operation was addressing.
    pub fn key(&self) -> ObjectKey {
        match self {
            Self::NotFound {
                namespace, name, ..
            }
            | Self::Lookup {
                namespace, name, ..
            }
            | Self::Creation {
                namespace, name, ..
            }
            | Self::Update {
                namespace, name, ..
            } => ObjectKey::new(namespace, name),
        }
    }
}

/// Errors surfaced by the broker facade on top of handler failures.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    /// No handler is registered for the requested kind
    #[error("unsupported resource kind: {0}")]
    UnsupportedKind(String),

    /// A handler for this kind is already registered
    #[error("resource kind '{kind}' is already registered")]
    DuplicateKind { kind: String },

    /// A dispatched handler operation failed
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// Errors that can occur while assembling a broker.
///
/// These are configuration mistakes and should surface during development
/// rather than at reconciliation time.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A store client was not configured
    #[error("a store client is required but was not provided")]
    MissingStore,

    /// Two handlers were registered for the same kind tag
    #[error("resource kind '{kind}' is registered more than once")]
    DuplicateKind { kind: String },
}

// Result type aliases for convenience
pub type HandlerResult<T> = Result<T, HandlerError>;
pub type BrokerResult<T> = Result<T, BrokerError>;
pub type BuildResult<T> = Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let key = ObjectKey::new("ops", "cluster-abc123");
        let error = HandlerError::not_found("Cluster", &key);
        assert_eq!(error.to_string(), "Cluster ops/cluster-abc123 not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_wrapped_error_carries_cause() {
        let key = ObjectKey::new("ops", "cluster-abc123");
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let error = HandlerError::lookup("Cluster", &key, cause);
        assert!(!error.is_not_found());
        assert!(error.to_string().contains("failed to retrieve"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_error_key_round_trip() {
        let key = ObjectKey::new("ops", "bucket-xyz");
        let error = HandlerError::not_found("Bucket", &key);
        assert_eq!(error.key(), key);
    }

    #[test]
    fn test_broker_error_from_handler_error() {
        let key = ObjectKey::new("ops", "cluster-abc123");
        let error = BrokerError::from(HandlerError::not_found("Cluster", &key));
        assert!(matches!(error, BrokerError::Handler(_)));
    }
}
