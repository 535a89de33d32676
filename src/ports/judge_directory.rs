//! Judge directory port (read side).

use crate::domain::foundation::{DomainError, EventId, JudgeId, JudgeType};
use crate::domain::judge::Judge;
use async_trait::async_trait;

/// Read port for the judge roster.
#[async_trait]
pub trait JudgeDirectory: Send + Sync {
    /// Find a judge by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &JudgeId) -> Result<Option<Judge>, DomainError>;

    /// List every judge assigned to an event.
    async fn list_by_event(&self, event_id: &EventId) -> Result<Vec<Judge>, DomainError>;

    /// List judges of one pool assigned to an event.
    async fn list_by_type(
        &self,
        event_id: &EventId,
        judge_type: JudgeType,
    ) -> Result<Vec<Judge>, DomainError>;
}
