//! Core broker structure and dispatched operations.

use crate::broker::builder::ClaimBrokerBuilder;
use crate::context::RequestContext;
use crate::error::{BrokerError, BrokerResult};
use crate::handler::ResourceHandler;
use crate::resource::{Resource, ResourceClaim, ResourceClass};
use crate::store::{ObjectKey, StoreClient};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Dispatches provisioning operations to per-kind handlers.
///
/// # Type Parameters
///
/// * `S` - The store client the registered handlers run against
///
/// # Examples
///
/// ```rust
/// use claim_broker::{ClaimBroker, ClusterHandler, BucketHandler};
/// use claim_broker::store::InMemoryStore;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut broker = ClaimBroker::new(InMemoryStore::new());
/// broker.register_handler(Arc::new(ClusterHandler))?;
/// broker.register_handler(Arc::new(BucketHandler))?;
/// # Ok(())
/// # }
/// ```
pub struct ClaimBroker<S: StoreClient> {
    pub(super) store: S,
    pub(super) handlers: HashMap<String, Arc<dyn ResourceHandler<S>>>,
}

impl<S: StoreClient> std::fmt::Debug for ClaimBroker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimBroker")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<S: StoreClient> ClaimBroker<S> {
    /// Create a broker with the given store and no registered handlers.
    pub fn new(store: S) -> Self {
        Self {
            store,
            handlers: HashMap::new(),
        }
    }

    /// Start building a broker.
    pub fn builder() -> ClaimBrokerBuilder<S> {
        ClaimBrokerBuilder::new()
    }

    /// The store client this broker dispatches against.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Locate the resource with the given identity.
    pub async fn find(
        &self,
        kind: &str,
        key: &ObjectKey,
        context: &RequestContext,
    ) -> BrokerResult<Resource> {
        let handler = self.handler_for(kind)?;
        debug!("dispatching find for {} {}", kind, key);
        Ok(handler.find(key, &self.store, context).await?)
    }

    /// Provision a resource for the claim from the class template.
    pub async fn provision(
        &self,
        kind: &str,
        class: &ResourceClass,
        claim: &ResourceClaim,
        context: &RequestContext,
    ) -> BrokerResult<Resource> {
        let handler = self.handler_for(kind)?;
        debug!("dispatching provision for {} claim '{}'", kind, claim.uid);
        Ok(handler.provision(class, claim, &self.store, context).await?)
    }

    /// Set the bound flag on the resource with the given identity.
    pub async fn set_bind_status(
        &self,
        kind: &str,
        key: &ObjectKey,
        bound: bool,
        context: &RequestContext,
    ) -> BrokerResult<()> {
        let handler = self.handler_for(kind)?;
        debug!("dispatching bind status {} for {} {}", bound, kind, key);
        Ok(handler
            .set_bind_status(key, &self.store, bound, context)
            .await?)
    }

    pub(super) fn handler_for(&self, kind: &str) -> Result<&Arc<dyn ResourceHandler<S>>, BrokerError> {
        self.handlers
            .get(kind)
            .ok_or_else(|| BrokerError::UnsupportedKind(kind.to_string()))
    }
}
