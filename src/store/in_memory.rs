//! In-memory store implementation.
//!
//! A thread-safe implementation of [`StoreClient`] over a nested HashMap
//! behind an async RwLock, intended for testing, development and as the
//! executable reference for the store contract: create-if-absent, optimistic
//! update on `resourceVersion`, and deadline enforcement from the request
//! context.
//!
//! On create the store stamps `metadata.uid`, `metadata.resourceVersion`
//! (starting at `"1"`) and `metadata.created`; on update it bumps the version
//! and preserves the original stamps, so callers always read back exactly
//! what a real object store would maintain for them.

use crate::context::RequestContext;
use crate::store::{ObjectKey, StoreClient, StoreError};
use chrono::Utc;
use log::trace;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Thread-safe in-memory object store.
///
/// Structure: `namespace` → `name` → object. All operations are async and
/// atomic under a single lock, which is what gives create and update their
/// race-safety guarantees.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<HashMap<String, HashMap<String, Value>>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored objects across all namespaces.
    pub async fn len(&self) -> usize {
        let data = self.data.read().await;
        data.values().map(HashMap::len).sum()
    }

    /// Check whether the store holds no objects.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove all objects (useful for tests).
    pub async fn clear(&self) {
        let mut data = self.data.write().await;
        data.clear();
    }

    /// Extract the (namespace, name) identity from an object's metadata.
    fn object_key(object: &Value) -> Result<ObjectKey, StoreError> {
        let metadata = object
            .get("metadata")
            .and_then(Value::as_object)
            .ok_or_else(|| StoreError::invalid_object("object has no metadata"))?;
        let namespace = metadata
            .get("namespace")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::invalid_object("metadata has no namespace"))?;
        let name = metadata
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::invalid_object("metadata has no name"))?;
        Ok(ObjectKey::new(namespace, name))
    }

    fn metadata_mut(object: &mut Value) -> Result<&mut Map<String, Value>, StoreError> {
        object
            .get_mut("metadata")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| StoreError::invalid_object("object has no metadata"))
    }

    fn ensure_deadline(context: &RequestContext, operation: &str) -> Result<(), StoreError> {
        if context.is_expired() {
            return Err(StoreError::timeout(operation));
        }
        Ok(())
    }

    fn version_of(object: &Value) -> Option<String> {
        object
            .get("metadata")
            .and_then(|m| m.get("resourceVersion"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl StoreClient for InMemoryStore {
    type Error = StoreError;

    async fn get(
        &self,
        key: &ObjectKey,
        context: &RequestContext,
    ) -> Result<Option<Value>, Self::Error> {
        Self::ensure_deadline(context, "get")?;

        let data = self.data.read().await;
        let result = data
            .get(key.namespace())
            .and_then(|namespace| namespace.get(key.name()))
            .cloned();
        trace!(
            "get {} -> {} (request: '{}')",
            key,
            if result.is_some() { "hit" } else { "miss" },
            context.request_id
        );
        Ok(result)
    }

    async fn create(&self, mut object: Value, context: &RequestContext) -> Result<Value, Self::Error> {
        Self::ensure_deadline(context, "create")?;
        let key = Self::object_key(&object)?;

        let mut data = self.data.write().await;
        let namespace = data.entry(key.namespace().to_string()).or_default();
        if namespace.contains_key(key.name()) {
            return Err(StoreError::already_exists(key.namespace(), key.name()));
        }

        let metadata = Self::metadata_mut(&mut object)?;
        metadata.insert(
            "uid".to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
        metadata.insert("resourceVersion".to_string(), Value::String("1".to_string()));
        metadata.insert(
            "created".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        namespace.insert(key.name().to_string(), object.clone());
        trace!("created {} (request: '{}')", key, context.request_id);
        Ok(object)
    }

    async fn update(&self, mut object: Value, context: &RequestContext) -> Result<Value, Self::Error> {
        Self::ensure_deadline(context, "update")?;
        let key = Self::object_key(&object)?;

        let mut data = self.data.write().await;
        let namespace = data
            .get_mut(key.namespace())
            .ok_or_else(|| StoreError::not_found(key.namespace(), key.name()))?;
        let current = namespace
            .get(key.name())
            .ok_or_else(|| StoreError::not_found(key.namespace(), key.name()))?;

        let current_version = Self::version_of(current);
        let incoming_version = Self::version_of(&object);
        if incoming_version.is_some() && incoming_version != current_version {
            return Err(StoreError::conflict(
                key.namespace(),
                key.name(),
                current_version,
                incoming_version,
            ));
        }

        let next_version = current_version
            .as_deref()
            .and_then(|v| v.parse::<u64>().ok())
            .map(|v| v + 1)
            .unwrap_or(1)
            .to_string();
        let uid = current.get("metadata").and_then(|m| m.get("uid")).cloned();
        let created = current
            .get("metadata")
            .and_then(|m| m.get("created"))
            .cloned();

        let metadata = Self::metadata_mut(&mut object)?;
        metadata.insert("resourceVersion".to_string(), Value::String(next_version));
        if let Some(uid) = uid {
            metadata.insert("uid".to_string(), uid);
        }
        if let Some(created) = created {
            metadata.insert("created".to_string(), created);
        }

        namespace.insert(key.name().to_string(), object.clone());
        trace!("updated {} (request: '{}')", key, context.request_id);
        Ok(object)
    }
}
