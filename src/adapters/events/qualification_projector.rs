//! Qualification projector.
//!
//! Consumes `team.qualified.v1` / `team.eliminated.v1` envelopes and
//! applies the status transition to the team repository. The allocation
//! engine never writes qualification fields itself; this projector is
//! the single consumer that does.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::domain::team::{QualificationStatus, TeamEliminated, TeamQualified};
use crate::ports::{EventHandler, TeamRepository};

/// Event types this projector consumes.
pub const QUALIFICATION_EVENT_TYPES: [&str; 2] = ["team.qualified.v1", "team.eliminated.v1"];

/// Applies qualification events to team records.
pub struct QualificationProjector {
    teams: Arc<dyn TeamRepository>,
}

impl QualificationProjector {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }
}

#[async_trait]
impl EventHandler for QualificationProjector {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        match event.event_type.as_str() {
            "team.qualified.v1" => {
                let payload: TeamQualified =
                    serde_json::from_value(event.payload).map_err(|e| {
                        DomainError::new(ErrorCode::InternalError, e.to_string())
                    })?;
                tracing::debug!(team_id = %payload.team_id, rank = payload.domain_rank, "applying qualification");
                self.teams
                    .apply_qualification(&payload.team_id, QualificationStatus::Qualified)
                    .await
            }
            "team.eliminated.v1" => {
                let payload: TeamEliminated =
                    serde_json::from_value(event.payload).map_err(|e| {
                        DomainError::new(ErrorCode::InternalError, e.to_string())
                    })?;
                self.teams
                    .apply_qualification(&payload.team_id, QualificationStatus::Eliminated)
                    .await
            }
            other => Err(DomainError::new(
                ErrorCode::InternalError,
                format!("QualificationProjector received unexpected event '{}'", other),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "QualificationProjector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTeamRepository;
    use crate::domain::foundation::{
        DomainEventId, DomainKey, EventId, Round, SerializableDomainEvent, TeamId, Timestamp,
    };
    use crate::domain::team::{Team, TeamMember};

    async fn seeded_repo() -> (Arc<InMemoryTeamRepository>, TeamId) {
        let repo = Arc::new(InMemoryTeamRepository::new());
        let team = Team::new(
            TeamId::new(),
            EventId::new(),
            DomainKey::new("fintech").unwrap(),
            "Ledger Lions",
            "A problem worth solving",
            vec![TeamMember::new("Member").unwrap()],
        )
        .unwrap();
        let id = *team.id();
        repo.save(&team).await.unwrap();
        (repo, id)
    }

    #[tokio::test]
    async fn qualified_event_marks_team_qualified() {
        let (repo, team_id) = seeded_repo().await;
        let projector = QualificationProjector::new(repo.clone());

        let event = TeamQualified {
            event_id: DomainEventId::new(),
            team_id,
            competition_event_id: EventId::new(),
            domain: DomainKey::new("fintech").unwrap(),
            round: Round::Round2,
            domain_rank: 1,
            occurred_at: Timestamp::now(),
        };
        projector.handle(event.to_envelope()).await.unwrap();

        let team = repo.find_by_id(&team_id).await.unwrap().unwrap();
        assert_eq!(team.qualification_status(), QualificationStatus::Qualified);
    }

    #[tokio::test]
    async fn eliminated_event_marks_team_eliminated() {
        let (repo, team_id) = seeded_repo().await;
        let projector = QualificationProjector::new(repo.clone());

        let event = TeamEliminated {
            event_id: DomainEventId::new(),
            team_id,
            competition_event_id: EventId::new(),
            domain: DomainKey::new("fintech").unwrap(),
            occurred_at: Timestamp::now(),
        };
        projector.handle(event.to_envelope()).await.unwrap();

        let team = repo.find_by_id(&team_id).await.unwrap().unwrap();
        assert_eq!(team.qualification_status(), QualificationStatus::Eliminated);
    }

    #[tokio::test]
    async fn unexpected_event_type_is_an_error() {
        let (repo, _) = seeded_repo().await;
        let projector = QualificationProjector::new(repo);

        let envelope = EventEnvelope {
            event_id: DomainEventId::new(),
            event_type: "score.finalized.v1".to_string(),
            aggregate_id: "x".to_string(),
            aggregate_type: "Score".to_string(),
            occurred_at: Timestamp::now(),
            payload: serde_json::json!({}),
            metadata: Default::default(),
        };
        assert!(projector.handle(envelope).await.is_err());
    }
}
