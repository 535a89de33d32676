//! CalculateRoundTwoHandler - computes and commits Round 2 results.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, DomainEventId, EventId, Round, SerializableDomainEvent, Timestamp,
};
use crate::domain::progression::{
    build_round_two_results, ProgressionError, RoundCalculated, RoundTwoResultSet,
};
use crate::domain::scoring::Score;
use crate::domain::team::Team;
use crate::ports::{
    EventDirectory, EventPublisher, IdentityProvider, ProgressionStore, ScoreStore,
    TeamRepository,
};

/// Command to calculate Round 2 results for an event.
#[derive(Debug, Clone)]
pub struct CalculateRoundTwoCommand {
    pub event_id: EventId,
    /// Replace an existing snapshot (admin recalculation).
    pub force: bool,
}

/// Handler for the `Round2SetupDone -> Round2Calculated` transition.
///
/// Guard: at least one team carries a Round 2 allocation and every
/// allocated team has a finalized score from every external judge
/// assigned to it.
pub struct CalculateRoundTwoHandler {
    events: Arc<dyn EventDirectory>,
    teams: Arc<dyn TeamRepository>,
    scores: Arc<dyn ScoreStore>,
    progression: Arc<dyn ProgressionStore>,
    identity: Arc<dyn IdentityProvider>,
    publisher: Arc<dyn EventPublisher>,
}

impl CalculateRoundTwoHandler {
    pub fn new(
        events: Arc<dyn EventDirectory>,
        teams: Arc<dyn TeamRepository>,
        scores: Arc<dyn ScoreStore>,
        progression: Arc<dyn ProgressionStore>,
        identity: Arc<dyn IdentityProvider>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            events,
            teams,
            scores,
            progression,
            identity,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CalculateRoundTwoCommand,
        metadata: CommandMetadata,
    ) -> Result<RoundTwoResultSet, ProgressionError> {
        super::require_admin(self.identity.as_ref(), &metadata).await?;

        self.events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or(ProgressionError::EventNotFound(cmd.event_id))?;

        let stage = self.progression.stage(&cmd.event_id).await?;
        if stage.round_calculated(Round::Round2) && !cmd.force {
            return Err(ProgressionError::AlreadyCalculated(Round::Round2));
        }

        let teams = self.teams.list_by_event(&cmd.event_id).await?;
        let cohort: Vec<&Team> = teams
            .iter()
            .filter(|t| !t.allocated_judges().is_empty(Round::Round2))
            .collect();
        if cohort.is_empty() {
            return Err(ProgressionError::precondition(
                "No teams have been allocated for Round 2",
                0,
            ));
        }

        let scores = self.scores.list_finalized(&cmd.event_id, Round::Round2).await?;
        let unscored = cohort.iter().filter(|t| !fully_scored(t, &scores)).count();
        if unscored > 0 {
            return Err(ProgressionError::precondition(
                format!(
                    "{} of {} allocated teams are missing finalized Round 2 scores",
                    unscored,
                    cohort.len()
                ),
                unscored,
            ));
        }

        let results = build_round_two_results(&teams, &scores);
        self.progression
            .commit_round_two(&cmd.event_id, results.clone(), cmd.force)
            .await?;

        let announcement = RoundCalculated {
            event_id: DomainEventId::new(),
            competition_event_id: cmd.event_id,
            round: Round::Round2,
            entry_count: results.entries.len(),
            occurred_at: Timestamp::now(),
        };
        self.publisher
            .publish(
                announcement
                    .to_envelope()
                    .with_correlation_id(metadata.correlation_id())
                    .with_actor_id(metadata.actor_id.to_string()),
            )
            .await?;

        tracing::info!(
            event_id = %cmd.event_id,
            entries = results.entries.len(),
            "Round 2 results calculated"
        );
        Ok(results)
    }
}

/// An allocated team is fully scored when every assigned external judge
/// has finalized.
fn fully_scored(team: &Team, scores: &[Score]) -> bool {
    team.allocated_judges()
        .for_round(Round::Round2)
        .iter()
        .all(|judge| {
            scores
                .iter()
                .any(|s| s.key().team_id == *team.id() && s.key().judge_id == *judge)
        })
}
