//! Broker facade: kind-tag dispatch over registered handlers.
//!
//! The broker owns the store client and a registry mapping each resource kind
//! to its handler. The reconciliation loop talks to the broker; the broker
//! resolves the handler and delegates, adding nothing to the per-kind
//! contract beyond rejection of unknown kinds.

pub mod builder;
pub mod core;
pub mod registration;

pub use builder::ClaimBrokerBuilder;
pub use core::ClaimBroker;
