//! The provisioned resource object and its building blocks.

use crate::resource::class::ReclaimPolicy;
use crate::store::ObjectKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Label key identifying which provisioning backend created a resource.
///
/// Other system components filter on this label; the binding protocol only
/// stamps it.
pub const PROVISIONER_LABEL: &str = "claimbroker.dev/provisioner";

/// Reference to another namespaced object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub kind: String,
    pub namespace: String,
    pub name: String,
    pub uid: String,
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.namespace, self.name)
    }
}

/// Back-reference from a resource to the object that owns it.
///
/// Consumed by the external store for cascading lifecycle; never read by the
/// binding protocol itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReference {
    pub kind: String,
    pub name: String,
    pub uid: String,
}

/// Object metadata.
///
/// `uid`, `resource_version` and `created` are store-maintained stamps: absent
/// on a freshly assembled resource, present on anything read back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_references: Vec<OwnerReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// Resource spec: the stamped protocol fields plus the kind-specific payload.
///
/// `class_ref` and `claim_ref` are set once at creation and never mutated
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    pub provider_ref: ObjectRef,
    pub reclaim_policy: ReclaimPolicy,
    pub class_ref: ObjectRef,
    pub claim_ref: ObjectRef,
    /// Kind-specific fields, opaque to the binding protocol
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Binding status of a provisioned resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStatus {
    #[serde(default)]
    pub bound: bool,
}

impl ResourceStatus {
    /// Flip the bound flag. The only mutating path for binding state.
    pub fn set_bound(&mut self, bound: bool) {
        self.bound = bound;
    }
}

/// The concrete provisioned object backing a claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub metadata: ObjectMeta,
    pub spec: ResourceSpec,
    #[serde(default)]
    pub status: ResourceStatus,
}

impl Resource {
    /// Identity of this resource in the store.
    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(&self.metadata.namespace, &self.metadata.name)
    }

    /// Whether the resource is actively satisfying its claim.
    pub fn is_bound(&self) -> bool {
        self.status.bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_resource() -> Resource {
        let mut payload = Map::new();
        payload.insert("version".to_string(), json!("1.31"));
        payload.insert("nodeCount".to_string(), json!(3));

        let mut labels = BTreeMap::new();
        labels.insert(
            PROVISIONER_LABEL.to_string(),
            "clusters.claimbroker.dev".to_string(),
        );

        Resource {
            metadata: ObjectMeta {
                name: "cluster-abc123".to_string(),
                namespace: "ops".to_string(),
                labels,
                owner_references: vec![OwnerReference {
                    kind: "ResourceClaim".to_string(),
                    name: "analytics".to_string(),
                    uid: "abc123".to_string(),
                }],
                ..Default::default()
            },
            spec: ResourceSpec {
                provider_ref: ObjectRef {
                    kind: "Provider".to_string(),
                    namespace: "ops".to_string(),
                    name: "default-account".to_string(),
                    uid: "provider-uid-1".to_string(),
                },
                reclaim_policy: ReclaimPolicy::Delete,
                class_ref: ObjectRef {
                    kind: "ResourceClass".to_string(),
                    namespace: "ops".to_string(),
                    name: "standard".to_string(),
                    uid: "class-uid-1".to_string(),
                },
                claim_ref: ObjectRef {
                    kind: "ResourceClaim".to_string(),
                    namespace: "ops".to_string(),
                    name: "analytics".to_string(),
                    uid: "abc123".to_string(),
                },
                payload,
            },
            status: ResourceStatus::default(),
        }
    }

    #[test]
    fn test_resource_key() {
        let resource = sample_resource();
        assert_eq!(resource.key(), ObjectKey::new("ops", "cluster-abc123"));
    }

    #[test]
    fn test_new_resource_is_unbound() {
        let resource = sample_resource();
        assert!(!resource.is_bound());
    }

    #[test]
    fn test_spec_payload_is_flattened() {
        let resource = sample_resource();
        let value = serde_json::to_value(&resource).unwrap();

        assert_eq!(value["spec"]["version"], json!("1.31"));
        assert_eq!(value["spec"]["nodeCount"], json!(3));
        assert_eq!(value["spec"]["reclaimPolicy"], json!("Delete"));
        assert_eq!(value["spec"]["claimRef"]["uid"], json!("abc123"));
        assert_eq!(value["metadata"]["ownerReferences"][0]["uid"], json!("abc123"));
        // Store stamps are absent until the object is persisted
        assert!(value["metadata"].get("resourceVersion").is_none());
    }

    #[test]
    fn test_round_trip_preserves_payload() {
        let resource = sample_resource();
        let value = serde_json::to_value(&resource).unwrap();
        let parsed: Resource = serde_json::from_value(value).unwrap();

        assert_eq!(parsed.spec.payload.get("version"), Some(&json!("1.31")));
        assert_eq!(parsed.spec.claim_ref, resource.spec.claim_ref);
        assert_eq!(parsed.spec.class_ref, resource.spec.class_ref);
    }

    #[test]
    fn test_set_bound() {
        let mut resource = sample_resource();
        resource.status.set_bound(true);
        assert!(resource.is_bound());
        resource.status.set_bound(false);
        assert!(!resource.is_bound());
    }
}
