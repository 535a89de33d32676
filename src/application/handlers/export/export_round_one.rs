//! ExportRoundOneHandler - builds the Round 1 scores workbook.

use std::sync::Arc;

use crate::domain::export::{round_one_workbook, Report};
use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, EventId, Round,
};
use crate::ports::{
    EventDirectory, IdentityProvider, JudgeDirectory, ScoreStore, TeamRepository,
};

/// Query for the Round 1 export workbook.
#[derive(Debug, Clone)]
pub struct ExportRoundOneQuery {
    pub event_id: EventId,
}

/// Handler assembling the Round 1 workbook from current state.
///
/// Read-only. Missing data comes back as an empty report with a notice,
/// never as an error.
pub struct ExportRoundOneHandler {
    events: Arc<dyn EventDirectory>,
    teams: Arc<dyn TeamRepository>,
    judges: Arc<dyn JudgeDirectory>,
    scores: Arc<dyn ScoreStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl ExportRoundOneHandler {
    pub fn new(
        events: Arc<dyn EventDirectory>,
        teams: Arc<dyn TeamRepository>,
        judges: Arc<dyn JudgeDirectory>,
        scores: Arc<dyn ScoreStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            events,
            teams,
            judges,
            scores,
            identity,
        }
    }

    pub async fn handle(
        &self,
        query: ExportRoundOneQuery,
        metadata: CommandMetadata,
    ) -> Result<Report, DomainError> {
        let identity = self
            .identity
            .resolve(&metadata.actor_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::Forbidden, "Unknown actor"))?;
        if !identity.is_admin() {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only admins may export results",
            ));
        }

        let event = self.events.find_by_id(&query.event_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::EventNotFound,
                format!("Event not found: {}", query.event_id),
            )
        })?;
        let teams = self.teams.list_by_event(&query.event_id).await?;
        let judges = self.judges.list_by_event(&query.event_id).await?;
        let scores = self.scores.list_finalized(&query.event_id, Round::Round1).await?;

        let report = round_one_workbook(&event, &teams, &judges, &scores);
        if let Some(notice) = &report.notice {
            tracing::debug!(event_id = %query.event_id, notice, "Round 1 export produced no data");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryEventDirectory, InMemoryJudgeDirectory, InMemoryScoreStore,
        InMemoryTeamRepository, StaticIdentityProvider,
    };
    use crate::domain::event::{Criterion, Domain, Event};
    use crate::domain::foundation::{
        ActorId, CriterionId, DomainKey, Identity, JudgeId, JudgeType, TeamId, Timestamp,
    };
    use crate::domain::judge::Judge;
    use crate::domain::scoring::{BonusScore, Score, ScoreKey};
    use crate::domain::team::{Team, TeamMember};
    use crate::ports::{ScoreStore as _, TeamRepository as _};

    async fn handler_with_data(seed: bool) -> ExportRoundOneHandler {
        let events = Arc::new(InMemoryEventDirectory::new());
        let teams = Arc::new(InMemoryTeamRepository::new());
        let judges = Arc::new(InMemoryJudgeDirectory::new());
        let scores = Arc::new(InMemoryScoreStore::new());
        let identity = Arc::new(StaticIdentityProvider::new());
        identity
            .register(Identity::admin(ActorId::new("admin-1").unwrap()))
            .await;

        let event = Event::new(
            EventId::from_uuid(uuid::Uuid::nil()),
            "Pitch Finals",
            Timestamp::now(),
            vec![Domain::new(DomainKey::new("fintech").unwrap(), "Fintech").unwrap()],
            vec![Criterion::new(CriterionId::new("overall").unwrap(), "Overall", 100.0).unwrap()],
        )
        .unwrap();
        events.insert(event.clone()).await;

        if seed {
            let judge = Judge::new(JudgeId::new(), "Dr. Rao", JudgeType::Internal)
                .unwrap()
                .assign_event(*event.id());
            judges.insert(judge.clone()).await;

            let mut team = Team::new(
                TeamId::new(),
                *event.id(),
                DomainKey::new("fintech").unwrap(),
                "Ledger Lions",
                "A problem worth solving",
                vec![TeamMember::new("Member").unwrap()],
            )
            .unwrap();
            team.set_round_allocation(Round::Round1, [*judge.id()].into());
            teams.save(&team).await.unwrap();

            let score = Score::finalized(
                ScoreKey {
                    event_id: *event.id(),
                    team_id: *team.id(),
                    judge_id: *judge.id(),
                    round: Round::Round1,
                },
                &event,
                [(CriterionId::new("overall").unwrap(), 80.0)].into(),
                BonusScore::ZERO,
            )
            .unwrap();
            scores.finalize(score).await.unwrap();
        }

        ExportRoundOneHandler::new(events, teams, judges, scores, identity)
    }

    fn query() -> ExportRoundOneQuery {
        ExportRoundOneQuery {
            event_id: EventId::from_uuid(uuid::Uuid::nil()),
        }
    }

    fn admin() -> CommandMetadata {
        CommandMetadata::new(ActorId::new("admin-1").unwrap())
    }

    #[tokio::test]
    async fn builds_workbook_for_seeded_event() {
        let handler = handler_with_data(true).await;
        let report = handler.handle(query(), admin()).await.unwrap();
        assert!(report.has_data());
        assert!(report.sheets.iter().any(|s| s.name == "All Teams Aggregated"));
    }

    #[tokio::test]
    async fn empty_event_returns_notice_not_error() {
        let handler = handler_with_data(false).await;
        let report = handler.handle(query(), admin()).await.unwrap();
        assert!(!report.has_data());
        assert!(report.notice.is_some());
    }

    #[tokio::test]
    async fn non_admin_is_rejected() {
        let handler = handler_with_data(true).await;
        let result = handler
            .handle(query(), CommandMetadata::new(ActorId::new("judge-1").unwrap()))
            .await;
        assert_eq!(result.unwrap_err().code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn unknown_event_is_an_error() {
        let handler = handler_with_data(true).await;
        let result = handler
            .handle(
                ExportRoundOneQuery {
                    event_id: EventId::new(),
                },
                admin(),
            )
            .await;
        assert_eq!(result.unwrap_err().code, ErrorCode::EventNotFound);
    }
}
