//! SetupRoundTwoHandler - allocates external judges to the qualified cohort.

use std::sync::Arc;

use crate::domain::allocation::{plan_round_two, AllocationPlan};
use crate::domain::foundation::{
    CommandMetadata, DomainEventId, EventId, JudgeId, Round, SerializableDomainEvent, TeamId,
    Timestamp,
};
use crate::domain::judge::Judge;
use crate::domain::progression::{ProgressionError, RoundStage};
use crate::domain::team::{TeamEliminated, TeamQualified};
use crate::ports::{
    EventDirectory, EventPublisher, IdentityProvider, JudgeDirectory, ProgressionStore,
    TeamRepository,
};

/// Command to set up Round 2 with an external judge roster.
#[derive(Debug, Clone)]
pub struct SetupRoundTwoCommand {
    pub event_id: EventId,
    /// The external judges to fan out over the selected teams.
    pub judge_ids: Vec<JudgeId>,
}

/// Summary of a completed Round 2 setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationSummary {
    pub teams_allocated: usize,
    pub panel_size: usize,
    pub qualified: Vec<TeamId>,
    pub eliminated: Vec<TeamId>,
}

/// Handler for the `Round1Calculated -> Round2SetupDone` transition.
///
/// The allocation plan is a pure function of the Round 1 snapshot, the
/// roster, and the configured top-N, so a rerun with identical inputs
/// writes identical allocations; the stage CAS then picks exactly one
/// winner, and only the winner publishes qualification events.
pub struct SetupRoundTwoHandler {
    events: Arc<dyn EventDirectory>,
    teams: Arc<dyn TeamRepository>,
    judges: Arc<dyn JudgeDirectory>,
    progression: Arc<dyn ProgressionStore>,
    identity: Arc<dyn IdentityProvider>,
    publisher: Arc<dyn EventPublisher>,
    per_domain_top_n: usize,
}

impl SetupRoundTwoHandler {
    pub fn new(
        events: Arc<dyn EventDirectory>,
        teams: Arc<dyn TeamRepository>,
        judges: Arc<dyn JudgeDirectory>,
        progression: Arc<dyn ProgressionStore>,
        identity: Arc<dyn IdentityProvider>,
        publisher: Arc<dyn EventPublisher>,
        per_domain_top_n: usize,
    ) -> Self {
        Self {
            events,
            teams,
            judges,
            progression,
            identity,
            publisher,
            per_domain_top_n,
        }
    }

    pub async fn handle(
        &self,
        cmd: SetupRoundTwoCommand,
        metadata: CommandMetadata,
    ) -> Result<AllocationSummary, ProgressionError> {
        super::require_admin(self.identity.as_ref(), &metadata).await?;

        self.events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or(ProgressionError::EventNotFound(cmd.event_id))?;

        let stage = self.progression.stage(&cmd.event_id).await?;
        if stage.setup_done() {
            return Err(ProgressionError::AlreadySetup);
        }
        if !stage.round_calculated(Round::Round1) {
            return Err(ProgressionError::RoundNotReady {
                required: RoundStage::Round1Calculated,
                actual: stage,
            });
        }

        let judges = self.resolve_external_judges(&cmd.judge_ids).await?;
        if judges.is_empty() {
            return Err(ProgressionError::precondition(
                "At least one external judge is required for Round 2 setup",
                0,
            ));
        }

        let round1 = self
            .progression
            .round_one_results(&cmd.event_id)
            .await?
            .ok_or_else(|| ProgressionError::RoundNotReady {
                required: RoundStage::Round1Calculated,
                actual: stage,
            })?;

        let plan = plan_round_two(&round1, &judges, self.per_domain_top_n);

        // Apply allocations first: the plan is deterministic, so a racing
        // setup writes the same sets. The CAS below decides the winner.
        for (team_id, panel) in &plan.assignments {
            self.teams
                .set_round_allocation(team_id, Round::Round2, panel.clone())
                .await?;
        }

        self.progression.commit_round_two_setup(&cmd.event_id).await?;

        self.publish_qualification_events(&cmd.event_id, &plan, &metadata).await?;

        tracing::info!(
            event_id = %cmd.event_id,
            teams = plan.team_count(),
            panel = plan.panel_size(),
            "Round 2 setup complete"
        );

        Ok(AllocationSummary {
            teams_allocated: plan.team_count(),
            panel_size: plan.panel_size(),
            qualified: plan.selected.iter().map(|t| t.team_id).collect(),
            eliminated: plan.eliminated.iter().map(|t| t.team_id).collect(),
        })
    }

    async fn resolve_external_judges(
        &self,
        judge_ids: &[JudgeId],
    ) -> Result<Vec<Judge>, ProgressionError> {
        let mut judges = Vec::with_capacity(judge_ids.len());
        for id in judge_ids {
            let judge = self
                .judges
                .find_by_id(id)
                .await?
                .ok_or(ProgressionError::JudgeNotFound(*id))?;
            // The round policy drops wrong-pool judges from the roster.
            if judge.scores_round(Round::Round2) {
                judges.push(judge);
            }
        }
        Ok(judges)
    }

    async fn publish_qualification_events(
        &self,
        event_id: &EventId,
        plan: &AllocationPlan,
        metadata: &CommandMetadata,
    ) -> Result<(), ProgressionError> {
        let mut envelopes = Vec::with_capacity(plan.selected.len() + plan.eliminated.len());
        for team in &plan.selected {
            let event = TeamQualified {
                event_id: DomainEventId::new(),
                team_id: team.team_id,
                competition_event_id: *event_id,
                domain: team.domain.clone(),
                round: Round::Round2,
                domain_rank: team.domain_rank,
                occurred_at: Timestamp::now(),
            };
            envelopes.push(
                event
                    .to_envelope()
                    .with_correlation_id(metadata.correlation_id())
                    .with_actor_id(metadata.actor_id.to_string()),
            );
        }
        for team in &plan.eliminated {
            let event = TeamEliminated {
                event_id: DomainEventId::new(),
                team_id: team.team_id,
                competition_event_id: *event_id,
                domain: team.domain.clone(),
                occurred_at: Timestamp::now(),
            };
            envelopes.push(
                event
                    .to_envelope()
                    .with_correlation_id(metadata.correlation_id())
                    .with_actor_id(metadata.actor_id.to_string()),
            );
        }
        self.publisher.publish_all(envelopes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryEventBus, InMemoryEventDirectory, InMemoryJudgeDirectory,
        InMemoryProgressionStore, InMemoryTeamRepository, QualificationProjector,
        StaticIdentityProvider, QUALIFICATION_EVENT_TYPES,
    };
    use crate::domain::event::{Criterion, Domain, Event};
    use crate::domain::foundation::{
        ActorId, CriterionId, DomainKey, Identity, JudgeType, Round,
    };
    use crate::domain::progression::{ResultSet, RoundOneEntry, RoundOneResultSet};
    use crate::domain::team::{QualificationStatus, Team, TeamMember};
    use crate::ports::{EventSubscriber, TeamRepository as _};

    struct Fixture {
        handler: SetupRoundTwoHandler,
        teams: Arc<InMemoryTeamRepository>,
        judges: Arc<InMemoryJudgeDirectory>,
        progression: Arc<InMemoryProgressionStore>,
        bus: Arc<InMemoryEventBus>,
        event: Event,
    }

    async fn fixture(per_domain_top_n: usize) -> Fixture {
        let events = Arc::new(InMemoryEventDirectory::new());
        let teams = Arc::new(InMemoryTeamRepository::new());
        let judges = Arc::new(InMemoryJudgeDirectory::new());
        let progression = Arc::new(InMemoryProgressionStore::new());
        let identity = Arc::new(StaticIdentityProvider::new());
        let bus = Arc::new(InMemoryEventBus::new());

        // The projector keeps team records in step with emitted events.
        bus.subscribe_all(
            &QUALIFICATION_EVENT_TYPES,
            Arc::new(QualificationProjector::new(teams.clone())),
        );

        let event = Event::new(
            EventId::new(),
            "Pitch Finals",
            Timestamp::now(),
            vec![
                Domain::new(DomainKey::new("fintech").unwrap(), "Fintech").unwrap(),
                Domain::new(DomainKey::new("health").unwrap(), "Health").unwrap(),
            ],
            vec![Criterion::new(CriterionId::new("overall").unwrap(), "Overall", 100.0).unwrap()],
        )
        .unwrap();
        events.insert(event.clone()).await;
        identity
            .register(Identity::admin(ActorId::new("admin-1").unwrap()))
            .await;

        let handler = SetupRoundTwoHandler::new(
            events,
            teams.clone(),
            judges.clone(),
            progression.clone(),
            identity,
            bus.clone(),
            per_domain_top_n,
        );
        Fixture {
            handler,
            teams,
            judges,
            progression,
            bus,
            event,
        }
    }

    async fn seed_team(f: &Fixture, domain: &str, name: &str) -> Team {
        let team = Team::new(
            TeamId::new(),
            *f.event.id(),
            DomainKey::new(domain).unwrap(),
            name,
            "A problem worth solving",
            vec![TeamMember::new("Member").unwrap()],
        )
        .unwrap();
        f.teams.save(&team).await.unwrap();
        team
    }

    async fn seed_external(f: &Fixture, name: &str) -> Judge {
        let judge = Judge::new(JudgeId::new(), name, JudgeType::External)
            .unwrap()
            .assign_event(*f.event.id());
        f.judges.insert(judge.clone()).await;
        judge
    }

    /// Marks Round 1 calculated with the given ranked entries.
    async fn seed_round_one(f: &Fixture, entries: Vec<RoundOneEntry>) {
        let set: RoundOneResultSet = ResultSet {
            round: Round::Round1,
            computed_at: Timestamp::now(),
            entries,
        };
        f.progression
            .commit_round_one(f.event.id(), set, false)
            .await
            .unwrap();
    }

    fn entry(team: &Team, rank: u32, average: f64) -> RoundOneEntry {
        RoundOneEntry {
            team_id: *team.id(),
            domain: team.domain().clone(),
            total_score: average * 2.0,
            average_score: average,
            judge_count: 2,
            rank,
        }
    }

    fn admin() -> CommandMetadata {
        CommandMetadata::new(ActorId::new("admin-1").unwrap())
    }

    #[tokio::test]
    async fn allocates_top_teams_and_updates_statuses() {
        let f = fixture(2).await;
        let f1 = seed_team(&f, "fintech", "F1").await;
        let f2 = seed_team(&f, "fintech", "F2").await;
        let f3 = seed_team(&f, "fintech", "F3").await;
        let h1 = seed_team(&f, "health", "H1").await;
        seed_round_one(
            &f,
            vec![
                entry(&f1, 1, 90.0),
                entry(&f2, 2, 80.0),
                entry(&f3, 3, 70.0),
                entry(&h1, 1, 85.0),
            ],
        )
        .await;
        let e1 = seed_external(&f, "Ms. Vega").await;
        let e2 = seed_external(&f, "Mr. Ito").await;

        let summary = f
            .handler
            .handle(
                SetupRoundTwoCommand {
                    event_id: *f.event.id(),
                    judge_ids: vec![*e1.id(), *e2.id()],
                },
                admin(),
            )
            .await
            .unwrap();

        assert_eq!(summary.teams_allocated, 3);
        assert_eq!(summary.panel_size, 2);
        assert_eq!(summary.eliminated, vec![*f3.id()]);

        // Every external judge is on every selected team.
        for team_id in [f1.id(), f2.id(), h1.id()] {
            let team = f.teams.find_by_id(team_id).await.unwrap().unwrap();
            assert!(team.is_allocated(Round::Round2, e1.id()));
            assert!(team.is_allocated(Round::Round2, e2.id()));
            assert_eq!(team.qualification_status(), QualificationStatus::Qualified);
        }
        let eliminated = f.teams.find_by_id(f3.id()).await.unwrap().unwrap();
        assert!(eliminated.allocated_judges().is_empty(Round::Round2));
        assert_eq!(eliminated.qualification_status(), QualificationStatus::Eliminated);
    }

    #[tokio::test]
    async fn second_setup_is_rejected_with_already_setup() {
        let f = fixture(1).await;
        let f1 = seed_team(&f, "fintech", "F1").await;
        seed_round_one(&f, vec![entry(&f1, 1, 90.0)]).await;
        let e1 = seed_external(&f, "Ms. Vega").await;

        let cmd = SetupRoundTwoCommand {
            event_id: *f.event.id(),
            judge_ids: vec![*e1.id()],
        };
        f.handler.handle(cmd.clone(), admin()).await.unwrap();
        let qualified_events = f.bus.events_of_type("team.qualified.v1").len();

        let again = f.handler.handle(cmd, admin()).await;
        assert_eq!(again, Err(ProgressionError::AlreadySetup));
        // The loser published nothing further.
        assert_eq!(f.bus.events_of_type("team.qualified.v1").len(), qualified_events);
    }

    #[tokio::test]
    async fn setup_before_round_one_calculation_is_rejected() {
        let f = fixture(1).await;
        let e1 = seed_external(&f, "Ms. Vega").await;

        let result = f
            .handler
            .handle(
                SetupRoundTwoCommand {
                    event_id: *f.event.id(),
                    judge_ids: vec![*e1.id()],
                },
                admin(),
            )
            .await;
        assert!(matches!(result, Err(ProgressionError::RoundNotReady { .. })));
    }

    #[tokio::test]
    async fn empty_external_roster_fails_the_guard() {
        let f = fixture(1).await;
        let f1 = seed_team(&f, "fintech", "F1").await;
        seed_round_one(&f, vec![entry(&f1, 1, 90.0)]).await;

        // An internal judge in the roster does not count.
        let internal = Judge::new(JudgeId::new(), "Dr. Rao", JudgeType::Internal)
            .unwrap()
            .assign_event(*f.event.id());
        f.judges.insert(internal.clone()).await;

        let result = f
            .handler
            .handle(
                SetupRoundTwoCommand {
                    event_id: *f.event.id(),
                    judge_ids: vec![*internal.id()],
                },
                admin(),
            )
            .await;
        assert!(matches!(
            result,
            Err(ProgressionError::PreconditionNotMet { .. })
        ));
    }

    #[tokio::test]
    async fn unknown_judge_in_roster_is_rejected() {
        let f = fixture(1).await;
        let f1 = seed_team(&f, "fintech", "F1").await;
        seed_round_one(&f, vec![entry(&f1, 1, 90.0)]).await;

        let ghost = JudgeId::new();
        let result = f
            .handler
            .handle(
                SetupRoundTwoCommand {
                    event_id: *f.event.id(),
                    judge_ids: vec![ghost],
                },
                admin(),
            )
            .await;
        assert_eq!(result, Err(ProgressionError::JudgeNotFound(ghost)));
    }

    #[tokio::test]
    async fn non_admin_actor_is_rejected() {
        let f = fixture(1).await;
        let result = f
            .handler
            .handle(
                SetupRoundTwoCommand {
                    event_id: *f.event.id(),
                    judge_ids: vec![],
                },
                CommandMetadata::new(ActorId::new("judge-1").unwrap()),
            )
            .await;
        assert_eq!(result, Err(ProgressionError::Forbidden));
    }
}
