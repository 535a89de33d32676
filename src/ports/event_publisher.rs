//! Event publishing ports.

use crate::domain::foundation::{DomainError, EventEnvelope};
use async_trait::async_trait;
use std::sync::Arc;

/// Publishes domain events to whoever consumes them.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish a batch in order.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}

/// Handles delivered events.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process one event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Registers handlers for event types.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe a handler to one event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe a handler to several event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_publisher_is_object_safe() {
        fn _accepts_dyn(_publisher: &dyn EventPublisher) {}
    }

    #[test]
    fn event_handler_is_object_safe() {
        fn _accepts_dyn(_handler: &dyn EventHandler) {}
    }
}
