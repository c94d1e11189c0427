//! Resource handlers: the find/provision/bind contract.
//!
//! One [`ResourceHandler`] variant exists per provisionable kind; a registry
//! dispatches to the variant matching a claim's requested kind, and every
//! variant satisfies the identical contract:
//!
//! - `find` locates a resource by identity, with no side effects
//! - `provision` derives the resource from a (class, claim) pair and creates
//!   it exactly once
//! - `set_bind_status` is the only mutating path for the bound flag
//!
//! The shared machinery lives in this module; variant files contribute their
//! kind tag, name prefix, provisioner label and parameter parsing. Resource
//! names are `"<prefix>-" + claim.uid`, the idempotency key that keeps
//! re-invocation safe: a second `provision` for the same claim collides at
//! the store and is reported as a creation failure, which is why callers
//! `find` first.

pub mod bucket;
pub mod cluster;

pub use bucket::BucketHandler;
pub use cluster::ClusterHandler;

use crate::context::RequestContext;
use crate::error::HandlerError;
use crate::resource::{
    ObjectMeta, PROVISIONER_LABEL, Resource, ResourceClaim, ResourceClass, ResourceSpec,
    ResourceStatus,
};
use crate::store::{ObjectKey, StoreClient};
use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Contract every provisionable resource kind implements.
///
/// Handlers are stateless; all three operations are safe to call repeatedly
/// with the same inputs. Same-claim races are resolved by the store's own
/// atomicity, never by the handler.
#[async_trait]
pub trait ResourceHandler<S: StoreClient>: Send + Sync {
    /// The kind tag this handler is registered under.
    fn kind(&self) -> &'static str;

    /// Look up the resource with the given identity.
    ///
    /// Fails with [`HandlerError::NotFound`] on a clean miss — carrying
    /// enough context for the caller to decide whether to provision — and
    /// with [`HandlerError::Lookup`] on any other store failure. Never
    /// returns a partial or zero-valued resource.
    async fn find(
        &self,
        key: &ObjectKey,
        store: &S,
        context: &RequestContext,
    ) -> Result<Resource, HandlerError>;

    /// Provision a new resource for the claim from the class template.
    ///
    /// Returns the resource exactly as persisted. An already-existing
    /// resource is reported as [`HandlerError::Creation`], not success.
    async fn provision(
        &self,
        class: &ResourceClass,
        claim: &ResourceClaim,
        store: &S,
        context: &RequestContext,
    ) -> Result<Resource, HandlerError>;

    /// Set the resource's bound flag and persist it.
    ///
    /// Unbinding a resource that no longer exists succeeds as a no-op;
    /// binding one fails with [`HandlerError::Lookup`].
    async fn set_bind_status(
        &self,
        key: &ObjectKey,
        store: &S,
        bound: bool,
        context: &RequestContext,
    ) -> Result<(), HandlerError>;
}

/// A class parameter whose value could not be interpreted by the variant.
#[derive(Debug, thiserror::Error)]
#[error("invalid value '{value}' for parameter '{key}'")]
pub struct ParameterError {
    pub key: &'static str,
    pub value: String,
}

impl ParameterError {
    pub(crate) fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// Derive a resource name from its kind prefix and the owning claim's UID.
///
/// This is the 1:1 claim-to-resource mapping; nothing else indexes resources
/// by claim.
pub fn derive_name(prefix: &str, claim_uid: &str) -> String {
    format!("{}-{}", prefix, claim_uid)
}

/// Serialize a variant's typed spec into the flattened payload map.
pub(crate) fn to_payload<T: Serialize>(spec: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(spec)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "spec payload must be an object, got {}",
            other
        ))),
    }
}

/// Assemble an unpersisted resource from the class template and claim.
///
/// Stamps provider reference, reclaim policy, class/claim back-references,
/// the provisioner label and the claim owner reference. Store-level metadata
/// stamps are left for the store.
pub(crate) fn assemble_resource(
    name: String,
    provisioner: &str,
    class: &ResourceClass,
    claim: &ResourceClaim,
    payload: Map<String, Value>,
) -> Resource {
    let mut labels = BTreeMap::new();
    labels.insert(PROVISIONER_LABEL.to_string(), provisioner.to_string());

    Resource {
        metadata: ObjectMeta {
            name,
            namespace: class.namespace.clone(),
            labels,
            owner_references: vec![claim.owner_reference()],
            ..Default::default()
        },
        spec: ResourceSpec {
            provider_ref: class.provider_ref.clone(),
            reclaim_policy: class.reclaim_policy,
            class_ref: class.object_ref(),
            claim_ref: claim.object_ref(),
            payload,
        },
        status: ResourceStatus::default(),
    }
}

/// Shared `find` implementation: get, miss-to-NotFound, decode.
pub(crate) async fn find_object<S: StoreClient>(
    kind: &str,
    key: &ObjectKey,
    store: &S,
    context: &RequestContext,
) -> Result<Resource, HandlerError> {
    debug!(
        "retrieving {} {} (request: '{}')",
        kind, key, context.request_id
    );
    let value = store
        .get(key, context)
        .await
        .map_err(|e| HandlerError::lookup(kind, key, e))?
        .ok_or_else(|| HandlerError::not_found(kind, key))?;
    serde_json::from_value(value).map_err(|e| HandlerError::lookup(kind, key, e))
}

/// Shared `provision` tail: encode, create, decode what was persisted.
pub(crate) async fn create_object<S: StoreClient>(
    kind: &str,
    resource: Resource,
    store: &S,
    context: &RequestContext,
) -> Result<Resource, HandlerError> {
    let key = resource.key();
    info!(
        "provisioning {} {} for claim '{}' (request: '{}')",
        kind, key, resource.spec.claim_ref.uid, context.request_id
    );
    let value =
        serde_json::to_value(&resource).map_err(|e| HandlerError::creation(kind, &key, e))?;
    let stored = store
        .create(value, context)
        .await
        .map_err(|e| HandlerError::creation(kind, &key, e))?;
    serde_json::from_value(stored).map_err(|e| HandlerError::creation(kind, &key, e))
}

/// Shared `set_bind_status` implementation.
///
/// Unbind of an already-deleted resource is a successful no-op; bind of a
/// missing resource is a lookup failure. The asymmetry encodes idempotent
/// teardown and is intentional.
pub(crate) async fn update_bind_status<S: StoreClient>(
    kind: &str,
    key: &ObjectKey,
    store: &S,
    bound: bool,
    context: &RequestContext,
) -> Result<(), HandlerError> {
    let mut resource = match find_object(kind, key, store, context).await {
        Ok(resource) => resource,
        Err(err @ HandlerError::NotFound { .. }) => {
            return if bound {
                Err(HandlerError::lookup(kind, key, err))
            } else {
                Ok(())
            };
        }
        Err(err) => return Err(err),
    };

    resource.status.set_bound(bound);
    debug!(
        "setting {} {} bound={} (request: '{}')",
        kind, key, bound, context.request_id
    );
    let value = serde_json::to_value(&resource).map_err(|e| HandlerError::update(kind, key, e))?;
    store
        .update(value, context)
        .await
        .map_err(|e| HandlerError::update(kind, key, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_name() {
        assert_eq!(derive_name("cluster", "abc123"), "cluster-abc123");
        assert_eq!(derive_name("bucket", "abc123"), "bucket-abc123");
    }

    #[test]
    fn test_derive_name_is_deterministic() {
        assert_eq!(derive_name("cluster", "u-1"), derive_name("cluster", "u-1"));
        assert_ne!(derive_name("cluster", "u-1"), derive_name("cluster", "u-2"));
    }

    #[test]
    fn test_parameter_error_display() {
        let error = ParameterError::new("nodeCount", "many");
        assert_eq!(
            error.to_string(),
            "invalid value 'many' for parameter 'nodeCount'"
        );
    }
}
