//! In-memory event and judge directories.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, EventId, JudgeId, JudgeType};
use crate::domain::judge::Judge;
use crate::ports::{EventDirectory, JudgeDirectory};

/// In-memory competition event directory.
#[derive(Default)]
pub struct InMemoryEventDirectory {
    events: RwLock<HashMap<EventId, Event>>,
}

impl InMemoryEventDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an event.
    pub async fn insert(&self, event: Event) {
        self.events.write().await.insert(*event.id(), event);
    }
}

#[async_trait]
impl EventDirectory for InMemoryEventDirectory {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        Ok(self.events.read().await.get(id).cloned())
    }
}

/// In-memory judge directory.
#[derive(Default)]
pub struct InMemoryJudgeDirectory {
    judges: RwLock<HashMap<JudgeId, Judge>>,
}

impl InMemoryJudgeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a judge.
    pub async fn insert(&self, judge: Judge) {
        self.judges.write().await.insert(*judge.id(), judge);
    }
}

#[async_trait]
impl JudgeDirectory for InMemoryJudgeDirectory {
    async fn find_by_id(&self, id: &JudgeId) -> Result<Option<Judge>, DomainError> {
        Ok(self.judges.read().await.get(id).cloned())
    }

    async fn list_by_event(&self, event_id: &EventId) -> Result<Vec<Judge>, DomainError> {
        let judges = self.judges.read().await;
        let mut out: Vec<Judge> = judges
            .values()
            .filter(|j| j.is_assigned_to(event_id))
            .cloned()
            .collect();
        out.sort_by_key(|j| *j.id());
        Ok(out)
    }

    async fn list_by_type(
        &self,
        event_id: &EventId,
        judge_type: JudgeType,
    ) -> Result<Vec<Judge>, DomainError> {
        Ok(self
            .list_by_event(event_id)
            .await?
            .into_iter()
            .filter(|j| j.judge_type() == judge_type)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{Criterion, Domain};
    use crate::domain::foundation::{CriterionId, DomainKey, Timestamp};

    #[tokio::test]
    async fn event_directory_round_trips() {
        let dir = InMemoryEventDirectory::new();
        let event = Event::new(
            EventId::new(),
            "Pitch Finals",
            Timestamp::now(),
            vec![Domain::new(DomainKey::new("fintech").unwrap(), "Fintech").unwrap()],
            vec![Criterion::new(CriterionId::new("overall").unwrap(), "Overall", 100.0).unwrap()],
        )
        .unwrap();
        let id = *event.id();
        dir.insert(event).await;

        assert!(dir.find_by_id(&id).await.unwrap().is_some());
        assert!(dir.find_by_id(&EventId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn judge_directory_filters_by_event_and_type() {
        let dir = InMemoryJudgeDirectory::new();
        let event_id = EventId::new();

        let internal = Judge::new(JudgeId::new(), "Dr. Rao", JudgeType::Internal)
            .unwrap()
            .assign_event(event_id);
        let external = Judge::new(JudgeId::new(), "Ms. Vega", JudgeType::External)
            .unwrap()
            .assign_event(event_id);
        let elsewhere = Judge::new(JudgeId::new(), "Mr. Ito", JudgeType::External)
            .unwrap()
            .assign_event(EventId::new());
        dir.insert(internal).await;
        dir.insert(external.clone()).await;
        dir.insert(elsewhere).await;

        assert_eq!(dir.list_by_event(&event_id).await.unwrap().len(), 2);
        let externals = dir.list_by_type(&event_id, JudgeType::External).await.unwrap();
        assert_eq!(externals.len(), 1);
        assert_eq!(externals[0].id(), external.id());
    }
}
