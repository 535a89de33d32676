//! Scoring audit events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainEventId, EventId, JudgeId, Round, TeamId, Timestamp};
use crate::domain_event;

/// Emitted when a judge's score is finalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFinalized {
    pub event_id: DomainEventId,
    pub team_id: TeamId,
    pub judge_id: JudgeId,
    pub competition_event_id: EventId,
    pub round: Round,
    pub total_score: f64,
    pub occurred_at: Timestamp,
}

domain_event!(
    ScoreFinalized,
    event_type = "score.finalized.v1",
    aggregate_id = team_id,
    aggregate_type = "Score",
    occurred_at = occurred_at,
    event_id = event_id
);
