//! Event publishing ports
//!
//! Delivery is in-process and synchronous to the caller: `publish_batch`
//! dispatches the events of one command in append order, awaiting each
//! handler sequentially. No ordering guarantee exists between events of
//! different commands, only within one command's batch.

use async_trait::async_trait;
use verdure_domain::events::{DomainEvent, EventKind};
use verdure_domain::DomainResult;

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: DomainEvent) -> DomainResult<()>;

    async fn publish_batch(&self, events: Vec<DomainEvent>) -> DomainResult<()>;
}

/// A subscriber that turns domain events into read-model writes.
///
/// Handlers declare the event kinds they project; the publisher's dispatch
/// registry routes each event to every handler registered for its kind.
/// Handlers must be idempotent with respect to replays of the same event.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Stable name used in logs and dead-letter records.
    fn name(&self) -> &'static str;

    /// Event kinds this handler projects.
    fn interests(&self) -> &'static [EventKind];

    async fn handle(&self, event: &DomainEvent) -> DomainResult<()>;
}
