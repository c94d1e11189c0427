//! Object model for claims, classes and provisioned resources.
//!
//! The model mirrors the three-way split the binding protocol is built on:
//!
//! - [`ResourceClass`] - a reusable provisioning template
//! - [`ResourceClaim`] - a namespaced request for a resource
//! - [`Resource`] - the concrete provisioned object backing a claim
//!
//! Typed fields cover the protocol-relevant attributes (references, reclaim
//! policy, bound flag); the kind-specific portion of a resource spec stays a
//! flexible JSON map so every variant can carry its own shape through the
//! same store.

pub mod claim;
pub mod class;
pub mod object;

pub use claim::ResourceClaim;
pub use class::{ReclaimPolicy, ResourceClass};
pub use object::{
    ObjectMeta, ObjectRef, OwnerReference, PROVISIONER_LABEL, Resource, ResourceSpec,
    ResourceStatus,
};
