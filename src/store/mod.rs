//! Store client abstraction for persisted resource objects.
//!
//! The binding protocol treats the object store as a synchronous, fallible
//! key-value store keyed by (namespace, name). The [`StoreClient`] trait
//! defines the three primitives the protocol consumes — get, create, update —
//! over plain JSON values; object encoding is entirely the store's concern,
//! and no protocol logic lives below this line.
//!
//! # Contract
//!
//! - `get` returns `Ok(None)` for a clean miss; errors are reserved for real
//!   store failures.
//! - `create` is create-if-absent: it fails with `AlreadyExists` rather than
//!   replacing, which is what makes provisioning race-safe without locks.
//! - `update` replaces an existing object and may enforce optimistic
//!   concurrency, failing with `Conflict` on a stale write.
//! - Every call takes a [`RequestContext`]; deadline enforcement happens
//!   here, never in the handlers.
//!
//! # Example Usage
//!
//! ```rust
//! use claim_broker::store::{InMemoryStore, ObjectKey, StoreClient};
//! use claim_broker::RequestContext;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryStore::new();
//! let context = RequestContext::with_generated_id();
//!
//! let created = store
//!     .create(
//!         json!({
//!             "metadata": {"namespace": "ops", "name": "cluster-abc123"},
//!             "status": {"bound": false}
//!         }),
//!         &context,
//!     )
//!     .await?;
//! assert_eq!(created["metadata"]["resourceVersion"], "1");
//!
//! let found = store
//!     .get(&ObjectKey::new("ops", "cluster-abc123"), &context)
//!     .await?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;

pub use errors::StoreError;
pub use in_memory::InMemoryStore;

use crate::context::RequestContext;
use serde_json::Value;
use std::fmt;
use std::future::Future;

/// Identity of an object in the store: (namespace, name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    namespace: String,
    name: String,
}

impl ObjectKey {
    /// Create a new object key.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Get the namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the object name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Core trait for clients of the backing object store.
///
/// Implementations persist and retrieve JSON objects keyed by
/// (namespace, name) taken from the object's `metadata`. They own atomicity:
/// create-if-absent and optimistic update are the only concurrency-safety
/// mechanisms the protocol relies on.
pub trait StoreClient: Send + Sync {
    /// The error type returned by store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieve an object by key.
    ///
    /// Returns `Some(object)` if it exists, `None` if it doesn't. A miss is
    /// not an error at this layer.
    fn get(
        &self,
        key: &ObjectKey,
        context: &RequestContext,
    ) -> impl Future<Output = Result<Option<Value>, Self::Error>> + Send;

    /// Create an object, failing if one already exists under the same key.
    ///
    /// Returns the object exactly as persisted, including any store-level
    /// metadata stamps. Creation is a single atomic operation; no partial
    /// objects are ever persisted.
    fn create(
        &self,
        object: Value,
        context: &RequestContext,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Replace an existing object.
    ///
    /// Fails if the object does not exist, or with a conflict if the caller's
    /// copy is stale under the store's optimistic concurrency scheme.
    fn update(
        &self,
        object: Value,
        context: &RequestContext,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key() {
        let key = ObjectKey::new("ops", "cluster-abc123");
        assert_eq!(key.namespace(), "ops");
        assert_eq!(key.name(), "cluster-abc123");
        assert_eq!(key.to_string(), "ops/cluster-abc123");
    }

    #[test]
    fn test_object_key_equality() {
        assert_eq!(
            ObjectKey::new("ops", "cluster-abc123"),
            ObjectKey::new("ops", "cluster-abc123")
        );
        assert_ne!(
            ObjectKey::new("ops", "cluster-abc123"),
            ObjectKey::new("dev", "cluster-abc123")
        );
    }
}
