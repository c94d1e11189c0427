//! Handler registration on an already-built broker.

use crate::broker::core::ClaimBroker;
use crate::error::{BrokerError, BrokerResult};
use crate::handler::ResourceHandler;
use crate::store::StoreClient;
use std::sync::Arc;

impl<S: StoreClient> ClaimBroker<S> {
    /// Register a handler under its kind tag.
    ///
    /// Fails if a handler for that kind is already registered; kinds are
    /// never silently replaced.
    pub fn register_handler(&mut self, handler: Arc<dyn ResourceHandler<S>>) -> BrokerResult<()> {
        let kind = handler.kind().to_string();
        if self.handlers.contains_key(&kind) {
            return Err(BrokerError::DuplicateKind { kind });
        }
        self.handlers.insert(kind, handler);
        Ok(())
    }

    /// Kind tags with a registered handler.
    pub fn registered_kinds(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Check whether a kind has a registered handler.
    pub fn supports_kind(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{BucketHandler, ClusterHandler};
    use crate::store::InMemoryStore;

    #[test]
    fn test_registration() {
        let mut broker = ClaimBroker::new(InMemoryStore::new());
        broker.register_handler(Arc::new(ClusterHandler)).unwrap();
        broker.register_handler(Arc::new(BucketHandler)).unwrap();

        assert!(broker.supports_kind("Cluster"));
        assert!(broker.supports_kind("Bucket"));
        assert!(!broker.supports_kind("Database"));

        let mut kinds = broker.registered_kinds();
        kinds.sort();
        assert_eq!(kinds, vec!["Bucket", "Cluster"]);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut broker = ClaimBroker::new(InMemoryStore::new());
        broker.register_handler(Arc::new(ClusterHandler)).unwrap();

        let error = broker
            .register_handler(Arc::new(ClusterHandler))
            .unwrap_err();
        assert!(matches!(error, BrokerError::DuplicateKind { .. }));
    }
}
