//! Request context threaded through store and handler calls.
//!
//! Carries request identity for logging and an optional deadline so
//! cancellation/timeout is an explicit parameter rather than process-wide
//! state. Handlers perform no local waiting; deadline enforcement belongs to
//! the store client.

use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-invocation context for provisioning operations.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request
    pub request_id: String,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Create a new context with a specific request ID and no deadline.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            deadline: None,
        }
    }

    /// Create a new context with a generated request ID.
    pub fn with_generated_id() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            deadline: None,
        }
    }

    /// Set an absolute deadline for store calls made under this context.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the deadline relative to now.
    pub fn expires_in(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The absolute deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Time left before the deadline, `None` when no deadline is set.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_generated_id()
    }
}
