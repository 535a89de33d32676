//! Competition event directory port (read side).
//!
//! Event setup happens outside the engine; this port reads the
//! configured events the engine judges against.

use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, EventId};
use async_trait::async_trait;

/// Read port for competition event configuration.
#[async_trait]
pub trait EventDirectory: Send + Sync {
    /// Find an event by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_directory_is_object_safe() {
        fn _accepts_dyn(_dir: &dyn EventDirectory) {}
    }
}
