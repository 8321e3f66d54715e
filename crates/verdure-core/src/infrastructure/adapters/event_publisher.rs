//! In-process event publisher with projector dispatch
//!
//! Dispatch is driven by an explicit registry from event kind to the
//! projectors registered for it, assembled once at process start. Events
//! of one batch are delivered in append order, each handler awaited
//! sequentially.
//!
//! Projection failures are handled uniformly: bounded retries with
//! exponential backoff, then the event/handler pair is dead-lettered and
//! logged. A failing projector never fails the publish call, so the
//! originating command still succeeds while the read model lags - the
//! dead-letter queue makes that divergence observable.

use crate::config::RetryPolicy;
use crate::ports::{EventHandler, EventPublisher};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use verdure_domain::events::{DomainEvent, EventKind};
use verdure_domain::DomainResult;

/// An event a projector failed to process after all retry attempts.
#[derive(Debug, Clone)]
pub struct DeadLetter {
    pub event: DomainEvent,
    pub handler: &'static str,
    pub attempts: u32,
    pub error: String,
}

/// Event publisher dispatching to registered projectors.
pub struct ProjectionPublisher {
    registry: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
    retry: RetryPolicy,
    dead_letters: RwLock<Vec<DeadLetter>>,
}

impl ProjectionPublisher {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            registry: HashMap::new(),
            retry,
            dead_letters: RwLock::new(Vec::new()),
        }
    }

    /// Register a projector for every event kind it declares interest in.
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        for kind in handler.interests() {
            self.registry.entry(*kind).or_default().push(handler.clone());
        }
    }

    /// Projectors registered for the given kind, for wiring assertions.
    pub fn registered_for(&self, kind: EventKind) -> usize {
        self.registry.get(&kind).map_or(0, Vec::len)
    }

    /// Snapshot of the dead-letter queue.
    pub fn dead_letters(&self) -> Vec<DeadLetter> {
        self.dead_letters.read().clone()
    }

    /// Remove and return all dead letters, e.g. for re-driving them.
    pub fn drain_dead_letters(&self) -> Vec<DeadLetter> {
        std::mem::take(&mut *self.dead_letters.write())
    }

    async fn dispatch(&self, event: &DomainEvent) {
        let Some(handlers) = self.registry.get(&event.kind()) else {
            tracing::debug!(event = %event.kind(), "no projector registered");
            return;
        };

        for handler in handlers {
            self.deliver(handler.as_ref(), event).await;
        }
    }

    async fn deliver(&self, handler: &dyn EventHandler, event: &DomainEvent) {
        let mut attempt = 1u32;
        loop {
            match handler.handle(event).await {
                Ok(()) => {
                    tracing::debug!(
                        event = %event.kind(),
                        event_id = %event.id(),
                        handler = handler.name(),
                        "event projected"
                    );
                    return;
                }
                Err(error) if attempt < self.retry.max_attempts => {
                    tracing::warn!(
                        event = %event.kind(),
                        handler = handler.name(),
                        attempt,
                        %error,
                        "projection failed, retrying"
                    );
                    tokio::time::sleep(self.retry.backoff(attempt)).await;
                    attempt += 1;
                }
                Err(error) => {
                    tracing::error!(
                        event = %event.kind(),
                        event_id = %event.id(),
                        handler = handler.name(),
                        attempts = attempt,
                        %error,
                        "projection failed, dead-lettering event"
                    );
                    self.dead_letters.write().push(DeadLetter {
                        event: event.clone(),
                        handler: handler.name(),
                        attempts: attempt,
                        error: error.to_string(),
                    });
                    return;
                }
            }
        }
    }
}

#[async_trait]
impl EventPublisher for ProjectionPublisher {
    async fn publish(&self, event: DomainEvent) -> DomainResult<()> {
        self.dispatch(&event).await;
        Ok(())
    }

    async fn publish_batch(&self, events: Vec<DomainEvent>) -> DomainResult<()> {
        for event in &events {
            self.dispatch(event).await;
        }
        Ok(())
    }
}
