//! Builder for assembling a broker from a store and handlers.

use crate::broker::core::ClaimBroker;
use crate::error::{BuildError, BuildResult};
use crate::handler::ResourceHandler;
use crate::store::StoreClient;
use std::collections::HashMap;
use std::sync::Arc;

/// Fluent assembly of a [`ClaimBroker`].
///
/// Validates the configuration at `build` time: a store is required and each
/// kind tag may appear once.
pub struct ClaimBrokerBuilder<S: StoreClient> {
    store: Option<S>,
    handlers: Vec<Arc<dyn ResourceHandler<S>>>,
}

impl<S: StoreClient> ClaimBrokerBuilder<S> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            store: None,
            handlers: Vec::new(),
        }
    }

    /// Set the store client.
    pub fn with_store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    /// Add a handler; its kind tag becomes its registry key.
    pub fn with_handler(mut self, handler: Arc<dyn ResourceHandler<S>>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Assemble the broker.
    pub fn build(self) -> BuildResult<ClaimBroker<S>> {
        let store = self.store.ok_or(BuildError::MissingStore)?;

        let mut handlers: HashMap<String, Arc<dyn ResourceHandler<S>>> = HashMap::new();
        for handler in self.handlers {
            let kind = handler.kind().to_string();
            if handlers.contains_key(&kind) {
                return Err(BuildError::DuplicateKind { kind });
            }
            handlers.insert(kind, handler);
        }

        Ok(ClaimBroker { store, handlers })
    }
}

impl<S: StoreClient> Default for ClaimBrokerBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
