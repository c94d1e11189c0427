//! Resource claims.

use crate::resource::object::{ObjectRef, OwnerReference};
use serde::{Deserialize, Serialize};

/// Kind tag used when a claim is referenced from a provisioned resource.
pub const CLAIM_KIND: &str = "ResourceClaim";

/// A namespaced request for a provisioned resource.
///
/// The claim's UID is the idempotency key for the whole workflow: the
/// resource provisioned for it is named `"<prefix>-" + uid`, so at most one
/// resource ever backs a given claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceClaim {
    pub name: String,
    pub namespace: String,
    pub uid: String,
}

impl ResourceClaim {
    /// Build the back-reference stamped onto provisioned resources.
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            kind: CLAIM_KIND.to_string(),
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            uid: self.uid.clone(),
        }
    }

    /// Build the owner reference attached to a provisioned resource, used by
    /// the external store for cascading lifecycle.
    pub fn owner_reference(&self) -> OwnerReference {
        OwnerReference {
            kind: CLAIM_KIND.to_string(),
            name: self.name.clone(),
            uid: self.uid.clone(),
        }
    }
}
