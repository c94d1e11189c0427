//! Resource claim provisioning and binding library.
//!
//! Provides the handler contract that turns an abstract resource *claim* plus
//! a reusable provisioning *class* into a concrete managed resource, and keeps
//! the resource's binding state consistent under repeated, level-triggered
//! invocation. Storage is pluggable through the [`StoreClient`] trait.
//!
//! # Core Components
//!
//! - [`ClaimBroker`] - Facade dispatching operations to per-kind handlers
//! - [`ResourceHandler`] - Trait every provisionable kind implements
//! - [`StoreClient`] - Trait for the backing object store
//!
//! # Quick Start
//!
//! ```rust
//! use claim_broker::{ClaimBroker, ClusterHandler};
//! use claim_broker::store::InMemoryStore;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut broker = ClaimBroker::new(InMemoryStore::new());
//! broker.register_handler(Arc::new(ClusterHandler))?;
//! # Ok(())
//! # }
//! ```
//!
//! All three operations (`find`, `provision`, `set_bind_status`) are safe to
//! call repeatedly with the same inputs: resource names are derived
//! deterministically from the owning claim's UID, so re-invocation needs no
//! external locking layer.

pub mod broker;
pub mod context;
pub mod error;
pub mod handler;
pub mod resource;
pub mod store;

// Re-export commonly used types for convenience
pub use broker::{ClaimBroker, ClaimBrokerBuilder};
pub use context::RequestContext;
pub use error::{BrokerError, BrokerResult, BuildError, BuildResult, HandlerError, HandlerResult};
pub use handler::{BucketHandler, ClusterHandler, ResourceHandler, derive_name};
pub use resource::{
    ObjectMeta, ObjectRef, OwnerReference, ReclaimPolicy, Resource, ResourceClaim, ResourceClass,
    ResourceSpec, ResourceStatus,
};
pub use store::{InMemoryStore, ObjectKey, StoreClient, StoreError};
