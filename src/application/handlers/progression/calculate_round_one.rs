//! CalculateRoundOneHandler - computes and commits Round 1 results.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, DomainEventId, EventId, Round, SerializableDomainEvent, Timestamp,
};
use crate::domain::progression::{
    build_round_one_results, ProgressionError, RoundCalculated, RoundOneResultSet,
};
use crate::domain::scoring::Score;
use crate::domain::team::Team;
use crate::ports::{
    EventDirectory, EventPublisher, IdentityProvider, ProgressionStore, ScoreStore,
    TeamRepository,
};

/// Command to calculate Round 1 results for an event.
#[derive(Debug, Clone)]
pub struct CalculateRoundOneCommand {
    pub event_id: EventId,
    /// Replace an existing snapshot (admin recalculation).
    pub force: bool,
}

/// Handler for the `Round1Open -> Round1Calculated` transition.
///
/// Guard: every team must hold a finalized Round 1 score from each judge
/// in its allocation. Results are computed against a read snapshot and
/// committed together with the stage flip, so either every domain's
/// entries appear or none do.
pub struct CalculateRoundOneHandler {
    events: Arc<dyn EventDirectory>,
    teams: Arc<dyn TeamRepository>,
    scores: Arc<dyn ScoreStore>,
    progression: Arc<dyn ProgressionStore>,
    identity: Arc<dyn IdentityProvider>,
    publisher: Arc<dyn EventPublisher>,
}

impl CalculateRoundOneHandler {
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
        cmd: CalculateRoundOneCommand,
        metadata: CommandMetadata,
    ) -> Result<RoundOneResultSet, ProgressionError> {
        super::require_admin(self.identity.as_ref(), &metadata).await?;

        self.events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or(ProgressionError::EventNotFound(cmd.event_id))?;

        let stage = self.progression.stage(&cmd.event_id).await?;
        if stage.round_calculated(Round::Round1) && !cmd.force {
            return Err(ProgressionError::AlreadyCalculated(Round::Round1));
        }

        let teams = self.teams.list_by_event(&cmd.event_id).await?;
        if teams.is_empty() {
            return Err(ProgressionError::precondition(
                "No teams are registered for this event",
                0,
            ));
        }

        let scores = self.scores.list_finalized(&cmd.event_id, Round::Round1).await?;
        let unscored = teams.iter().filter(|t| !fully_scored(t, &scores)).count();
        if unscored > 0 {
            return Err(ProgressionError::precondition(
                format!("{} of {} teams are missing finalized Round 1 scores", unscored, teams.len()),
                unscored,
            ));
        }

        let results = build_round_one_results(&teams, &scores);
        self.progression
            .commit_round_one(&cmd.event_id, results.clone(), cmd.force)
            .await?;

        let announcement = RoundCalculated {
            event_id: DomainEventId::new(),
            competition_event_id: cmd.event_id,
            round: Round::Round1,
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
            "Round 1 results calculated"
        );
        Ok(results)
    }
}

/// A team is fully scored when it has a non-empty Round 1 allocation and
/// every allocated judge has finalized.
fn fully_scored(team: &Team, scores: &[Score]) -> bool {
    let allocation = team.allocated_judges().for_round(Round::Round1);
    !allocation.is_empty()
        && allocation.iter().all(|judge| {
            scores
                .iter()
                .any(|s| s.key().team_id == *team.id() && s.key().judge_id == *judge)
        })
}
