//! ExportRoundTwoHandler - builds the Round 2 reports.

use std::sync::Arc;

use crate::domain::export::{round_two_full, round_two_top3, Report};
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, EventId, Round};
use crate::ports::{
    EventDirectory, IdentityProvider, JudgeDirectory, ProgressionStore, ScoreStore,
    TeamRepository,
};

/// Which Round 2 report to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round2ExportVariant {
    /// The top-3 podium with member rosters.
    Top3,
    /// Every cohort team plus the per-judge breakdown.
    Full,
}

/// Query for a Round 2 export.
#[derive(Debug, Clone)]
pub struct ExportRoundTwoQuery {
    pub event_id: EventId,
    pub variant: Round2ExportVariant,
}

/// Handler assembling Round 2 reports from the committed snapshot.
pub struct ExportRoundTwoHandler {
    events: Arc<dyn EventDirectory>,
    teams: Arc<dyn TeamRepository>,
    judges: Arc<dyn JudgeDirectory>,
    scores: Arc<dyn ScoreStore>,
    progression: Arc<dyn ProgressionStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl ExportRoundTwoHandler {
    pub fn new(
        events: Arc<dyn EventDirectory>,
        teams: Arc<dyn TeamRepository>,
        judges: Arc<dyn JudgeDirectory>,
        scores: Arc<dyn ScoreStore>,
        progression: Arc<dyn ProgressionStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            events,
            teams,
            judges,
            scores,
            progression,
            identity,
        }
    }

    pub async fn handle(
        &self,
        query: ExportRoundTwoQuery,
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

        let Some(results) = self.progression.round_two_results(&query.event_id).await? else {
            return Ok(Report::empty_with_notice(
                "No Round 2 results available to export. Calculate Round 2 results first.",
            ));
        };
        let teams = self.teams.list_by_event(&query.event_id).await?;

        let report = match query.variant {
            Round2ExportVariant::Top3 => round_two_top3(&event, &teams, &results),
            Round2ExportVariant::Full => {
                let judges = self.judges.list_by_event(&query.event_id).await?;
                let scores = self
                    .scores
                    .list_finalized(&query.event_id, Round::Round2)
                    .await?;
                round_two_full(&event, &teams, &judges, &results, &scores)
            }
        };
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryEventDirectory, InMemoryJudgeDirectory, InMemoryProgressionStore,
        InMemoryScoreStore, InMemoryTeamRepository, StaticIdentityProvider,
    };
    use crate::domain::event::{Criterion, Domain, Event};
    use crate::domain::foundation::{
        ActorId, CriterionId, DomainKey, Identity, TeamId, Timestamp,
    };
    use crate::domain::progression::{ResultSet, RoundTwoEntry};
    use crate::domain::team::{Team, TeamMember};
    use crate::ports::TeamRepository as _;

    async fn fixture(calculated: bool) -> (ExportRoundTwoHandler, EventId) {
        let events = Arc::new(InMemoryEventDirectory::new());
        let teams = Arc::new(InMemoryTeamRepository::new());
        let judges = Arc::new(InMemoryJudgeDirectory::new());
        let scores = Arc::new(InMemoryScoreStore::new());
        let progression = Arc::new(InMemoryProgressionStore::new());
        let identity = Arc::new(StaticIdentityProvider::new());
        identity
            .register(Identity::admin(ActorId::new("admin-1").unwrap()))
            .await;

        let event = Event::new(
            EventId::new(),
            "Pitch Finals",
            Timestamp::now(),
            vec![Domain::new(DomainKey::new("fintech").unwrap(), "Fintech").unwrap()],
            vec![Criterion::new(CriterionId::new("overall").unwrap(), "Overall", 100.0).unwrap()],
        )
        .unwrap();
        let event_id = *event.id();
        events.insert(event).await;

        if calculated {
            let team = Team::new(
                TeamId::new(),
                event_id,
                DomainKey::new("fintech").unwrap(),
                "Ledger Lions",
                "A problem worth solving",
                vec![TeamMember::new("Asha").unwrap()],
            )
            .unwrap();
            teams.save(&team).await.unwrap();

            // Walk the stage machine to a committed Round 2 snapshot.
            progression
                .commit_round_one(
                    &event_id,
                    ResultSet {
                        round: Round::Round1,
                        computed_at: Timestamp::now(),
                        entries: vec![],
                    },
                    false,
                )
                .await
                .unwrap();
            progression.commit_round_two_setup(&event_id).await.unwrap();
            progression
                .commit_round_two(
                    &event_id,
                    ResultSet {
                        round: Round::Round2,
                        computed_at: Timestamp::now(),
                        entries: vec![RoundTwoEntry {
                            team_id: *team.id(),
                            domain: team.domain().clone(),
                            total_score: 180.0,
                            average_score: 90.0,
                            judge_count: 2,
                            rank: 1,
                        }],
                    },
                    false,
                )
                .await
                .unwrap();
        }

        let handler =
            ExportRoundTwoHandler::new(events, teams, judges, scores, progression, identity);
        (handler, event_id)
    }

    fn admin() -> CommandMetadata {
        CommandMetadata::new(ActorId::new("admin-1").unwrap())
    }

    #[tokio::test]
    async fn top3_report_builds_from_committed_snapshot() {
        let (handler, event_id) = fixture(true).await;
        let report = handler
            .handle(
                ExportRoundTwoQuery {
                    event_id,
                    variant: Round2ExportVariant::Top3,
                },
                admin(),
            )
            .await
            .unwrap();
        assert!(report.has_data());
        assert_eq!(report.sheets[0].name, "Round 2 Top 3");
    }

    #[tokio::test]
    async fn full_report_includes_breakdown_sheet() {
        let (handler, event_id) = fixture(true).await;
        let report = handler
            .handle(
                ExportRoundTwoQuery {
                    event_id,
                    variant: Round2ExportVariant::Full,
                },
                admin(),
            )
            .await
            .unwrap();
        assert_eq!(report.sheets.len(), 2);
        assert_eq!(report.sheets[1].name, "Judge Breakdown");
    }

    #[tokio::test]
    async fn uncalculated_round_two_returns_notice() {
        let (handler, event_id) = fixture(false).await;
        let report = handler
            .handle(
                ExportRoundTwoQuery {
                    event_id,
                    variant: Round2ExportVariant::Top3,
                },
                admin(),
            )
            .await
            .unwrap();
        assert!(!report.has_data());
        assert!(report.notice.is_some());
    }

    #[tokio::test]
    async fn non_admin_is_rejected() {
        let (handler, event_id) = fixture(true).await;
        let result = handler
            .handle(
                ExportRoundTwoQuery {
                    event_id,
                    variant: Round2ExportVariant::Top3,
                },
                CommandMetadata::new(ActorId::new("judge-1").unwrap()),
            )
            .await;
        assert_eq!(result.unwrap_err().code, ErrorCode::Forbidden);
    }
}
