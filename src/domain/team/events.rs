//! Team qualification events.
//!
//! The allocation engine does not write qualification fields directly;
//! it emits these events, and whatever persists Team records consumes
//! them. This keeps status changes explicit and auditable.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainEventId, DomainKey, EventId, Round, TeamId, Timestamp};
use crate::domain_event;

/// Emitted when Round 2 setup selects a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamQualified {
    pub event_id: DomainEventId,
    pub team_id: TeamId,
    pub competition_event_id: EventId,
    pub domain: DomainKey,
    /// The round the team qualified for.
    pub round: Round,
    /// The team's rank within its domain at selection time.
    pub domain_rank: u32,
    pub occurred_at: Timestamp,
}

domain_event!(
    TeamQualified,
    event_type = "team.qualified.v1",
    aggregate_id = team_id,
    aggregate_type = "Team",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Emitted when Round 2 setup passes a team over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEliminated {
    pub event_id: DomainEventId,
    pub team_id: TeamId,
    pub competition_event_id: EventId,
    pub domain: DomainKey,
    pub occurred_at: Timestamp,
}

domain_event!(
    TeamEliminated,
    event_type = "team.eliminated.v1",
    aggregate_id = team_id,
    aggregate_type = "Team",
    occurred_at = occurred_at,
    event_id = event_id
);
