//! Shared fixtures for integration tests.

use claim_broker::{ObjectRef, ReclaimPolicy, RequestContext, ResourceClaim, ResourceClass};
use std::collections::BTreeMap;

/// Initialize logging once per test binary; repeated calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn context() -> RequestContext {
    RequestContext::with_generated_id()
}

pub fn test_class(namespace: &str) -> ResourceClass {
    test_class_with_parameters(namespace, BTreeMap::new())
}

pub fn test_class_with_parameters(
    namespace: &str,
    parameters: BTreeMap<String, String>,
) -> ResourceClass {
    ResourceClass {
        name: "standard".to_string(),
        namespace: namespace.to_string(),
        uid: "class-uid-1".to_string(),
        parameters,
        provider_ref: ObjectRef {
            kind: "Provider".to_string(),
            namespace: namespace.to_string(),
            name: "default-account".to_string(),
            uid: "provider-uid-1".to_string(),
        },
        reclaim_policy: ReclaimPolicy::Delete,
    }
}

pub fn test_claim(namespace: &str, uid: &str) -> ResourceClaim {
    ResourceClaim {
        name: format!("claim-{}", uid),
        namespace: namespace.to_string(),
        uid: uid.to_string(),
    }
}
