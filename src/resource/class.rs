//! Provisioning templates.

use crate::resource::object::ObjectRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind tag used when a class is referenced from a provisioned resource.
pub const CLASS_KIND: &str = "ResourceClass";

/// Post-release disposition of a provisioned resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReclaimPolicy {
    /// Delete the resource when its claim is released
    Delete,
    /// Keep the resource after its claim is released
    #[default]
    Retain,
}

impl fmt::Display for ReclaimPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReclaimPolicy::Delete => write!(f, "Delete"),
            ReclaimPolicy::Retain => write!(f, "Retain"),
        }
    }
}

/// A reusable provisioning template.
///
/// Carries the kind-specific configuration blob plus the provider account and
/// reclaim policy every resource provisioned from it inherits. Treated as
/// immutable once a claim's resource references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceClass {
    pub name: String,
    pub namespace: String,
    pub uid: String,
    /// Kind-specific configuration, opaque to the binding protocol
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    /// Credentials/provider account to provision under
    pub provider_ref: ObjectRef,
    #[serde(default)]
    pub reclaim_policy: ReclaimPolicy,
}

impl ResourceClass {
    /// Build the back-reference stamped onto provisioned resources.
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            kind: CLASS_KIND.to_string(),
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            uid: self.uid.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_class() -> ResourceClass {
        ResourceClass {
            name: "standard".to_string(),
            namespace: "ops".to_string(),
            uid: "class-uid-1".to_string(),
            parameters: BTreeMap::new(),
            provider_ref: ObjectRef {
                kind: "Provider".to_string(),
                namespace: "ops".to_string(),
                name: "default-account".to_string(),
                uid: "provider-uid-1".to_string(),
            },
            reclaim_policy: ReclaimPolicy::Delete,
        }
    }

    #[test]
    fn test_reclaim_policy_defaults_to_retain() {
        assert_eq!(ReclaimPolicy::default(), ReclaimPolicy::Retain);
    }

    #[test]
    fn test_reclaim_policy_serialization() {
        assert_eq!(
            serde_json::to_value(ReclaimPolicy::Delete).unwrap(),
            serde_json::json!("Delete")
        );
        let parsed: ReclaimPolicy = serde_json::from_str("\"Retain\"").unwrap();
        assert_eq!(parsed, ReclaimPolicy::Retain);
    }

    #[test]
    fn test_class_object_ref() {
        let class = sample_class();
        let reference = class.object_ref();
        assert_eq!(reference.kind, CLASS_KIND);
        assert_eq!(reference.namespace, "ops");
        assert_eq!(reference.name, "standard");
        assert_eq!(reference.uid, "class-uid-1");
    }
}
