//! SubmitScoreHandler - Command handler for judge score submissions.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, CriterionId, DomainEventId, ErrorCode, EventId, JudgeId, Role, Round,
    SerializableDomainEvent, TeamId, Timestamp,
};
use crate::domain::scoring::{BonusScore, Score, ScoreFinalized, ScoreKey, ScoringError};
use crate::ports::{
    EventDirectory, EventPublisher, IdentityProvider, JudgeDirectory, ScoreStore, TeamRepository,
};

/// Command to submit a judge's score for a team.
#[derive(Debug, Clone)]
pub struct SubmitScoreCommand {
    pub event_id: EventId,
    pub team_id: TeamId,
    pub judge_id: JudgeId,
    pub round: Round,
    pub criterion_values: BTreeMap<CriterionId, f64>,
    /// Bonus in points; validated against the 0.5-step grid.
    pub bonus: f64,
    /// Lock the score on success. Drafts stay editable.
    pub finalize: bool,
}

/// Handler for score submissions.
///
/// Validation order: identity, judge round policy, allocation, value
/// ranges, completeness. The store enforces first-finalize-wins; this
/// handler maps the conflict to `AlreadyFinalized`.
pub struct SubmitScoreHandler {
    events: Arc<dyn EventDirectory>,
    teams: Arc<dyn TeamRepository>,
    judges: Arc<dyn JudgeDirectory>,
    scores: Arc<dyn ScoreStore>,
    identity: Arc<dyn IdentityProvider>,
    publisher: Arc<dyn EventPublisher>,
}

impl SubmitScoreHandler {
    pub fn new(
        events: Arc<dyn EventDirectory>,
        teams: Arc<dyn TeamRepository>,
        judges: Arc<dyn JudgeDirectory>,
        scores: Arc<dyn ScoreStore>,
        identity: Arc<dyn IdentityProvider>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            events,
            teams,
            judges,
            scores,
            identity,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitScoreCommand,
        metadata: CommandMetadata,
    ) -> Result<Score, ScoringError> {
        // 1. The actor must be a judge submitting as itself.
        let identity = self
            .identity
            .resolve(&metadata.actor_id)
            .await?
            .ok_or_else(|| ScoringError::forbidden("Unknown actor"))?;
        if identity.role != Role::Judge {
            return Err(ScoringError::forbidden("Only judges may submit scores"));
        }
        if identity.actor_id.as_str() != cmd.judge_id.to_string() {
            return Err(ScoringError::forbidden(
                "Judges may only submit scores as themselves",
            ));
        }

        // 2. The judge's pool must cover the requested round.
        let judge = self
            .judges
            .find_by_id(&cmd.judge_id)
            .await?
            .ok_or(ScoringError::JudgeNotFound(cmd.judge_id))?;
        if !judge.scores_round(cmd.round) {
            return Err(ScoringError::RoundMismatch {
                judge_type: judge.judge_type(),
                round: cmd.round,
            });
        }

        // 3. Event and team must exist, and the judge must be allocated.
        let event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or(ScoringError::EventNotFound(cmd.event_id))?;
        let team = self
            .teams
            .find_by_id(&cmd.team_id)
            .await?
            .filter(|t| t.event_id() == &cmd.event_id)
            .ok_or(ScoringError::TeamNotFound(cmd.team_id))?;
        if !team.is_allocated(cmd.round, &cmd.judge_id) {
            return Err(ScoringError::NotAllocated {
                judge_id: cmd.judge_id,
                team_id: cmd.team_id,
                round: cmd.round,
            });
        }

        // 4. Build the validated score.
        let bonus = BonusScore::try_from_points(cmd.bonus)?;
        let key = ScoreKey {
            event_id: cmd.event_id,
            team_id: cmd.team_id,
            judge_id: cmd.judge_id,
            round: cmd.round,
        };

        if !cmd.finalize {
            let draft = Score::draft(key, &event, cmd.criterion_values, bonus)?;
            let stored = self.scores.save_draft(draft).await.map_err(|e| match e.code {
                ErrorCode::AlreadyFinalized => ScoringError::AlreadyFinalized {
                    team_id: cmd.team_id,
                    judge_id: cmd.judge_id,
                    round: cmd.round,
                },
                _ => ScoringError::infrastructure(e.to_string()),
            })?;
            tracing::debug!(team_id = %cmd.team_id, judge_id = %cmd.judge_id, "draft score saved");
            return Ok(stored);
        }

        // 5. Finalize: first finalize wins, the store enforces it.
        let score = Score::finalized(key, &event, cmd.criterion_values, bonus)?;
        let stored = self.scores.finalize(score).await.map_err(|e| match e.code {
            ErrorCode::AlreadyFinalized => ScoringError::AlreadyFinalized {
                team_id: cmd.team_id,
                judge_id: cmd.judge_id,
                round: cmd.round,
            },
            _ => ScoringError::infrastructure(e.to_string()),
        })?;

        // 6. Announce the finalized score.
        let event_body = ScoreFinalized {
            event_id: DomainEventId::new(),
            team_id: cmd.team_id,
            judge_id: cmd.judge_id,
            competition_event_id: cmd.event_id,
            round: cmd.round,
            total_score: stored.total_score(),
            occurred_at: Timestamp::now(),
        };
        let envelope = event_body
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_actor_id(metadata.actor_id.to_string());
        self.publisher.publish(envelope).await?;

        tracing::info!(
            team_id = %cmd.team_id,
            judge_id = %cmd.judge_id,
            round = %cmd.round,
            total = stored.total_score(),
            "score finalized"
        );
        Ok(stored)
    }
}
