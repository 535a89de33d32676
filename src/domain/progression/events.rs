//! Round progression audit events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainEventId, EventId, Round, Timestamp};
use crate::domain_event;

/// Emitted when a round's results are calculated and committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundCalculated {
    pub event_id: DomainEventId,
    pub competition_event_id: EventId,
    pub round: Round,
    /// Result entries in the committed snapshot.
    pub entry_count: usize,
    pub occurred_at: Timestamp,
}

domain_event!(
    RoundCalculated,
    event_type = "round.calculated.v1",
    aggregate_id = competition_event_id,
    aggregate_type = "Event",
    occurred_at = occurred_at,
    event_id = event_id
);
