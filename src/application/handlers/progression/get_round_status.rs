//! GetRoundStatusHandler - idempotent round status query.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::foundation::{EventId, Round, TeamId};
use crate::domain::progression::ProgressionError;
use crate::ports::{ProgressionStore, ScoreStore, TeamRepository};

/// Query for one round's status.
#[derive(Debug, Clone)]
pub struct GetRoundStatusQuery {
    pub event_id: EventId,
    pub round: Round,
}

/// A round's progress as shown on calculation dashboards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStatus {
    pub round: Round,
    /// True once the round's result snapshot exists with entries.
    pub calculated: bool,
    /// Entries in the committed snapshot (0 before calculation).
    pub count: usize,
    /// Teams with at least one finalized score this round.
    pub scored_teams: usize,
    /// Denominator: all teams (Round 1) or the allocated cohort (Round 2).
    pub expected_teams: usize,
}

/// Handler recomputing round status from current state on every call.
///
/// Guards are re-evaluated each query; there are no cached verdicts and
/// no timers.
pub struct GetRoundStatusHandler {
    teams: Arc<dyn TeamRepository>,
    scores: Arc<dyn ScoreStore>,
    progression: Arc<dyn ProgressionStore>,
}

impl GetRoundStatusHandler {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        scores: Arc<dyn ScoreStore>,
        progression: Arc<dyn ProgressionStore>,
    ) -> Self {
        Self {
            teams,
            scores,
            progression,
        }
    }

    pub async fn handle(&self, query: GetRoundStatusQuery) -> Result<RoundStatus, ProgressionError> {
        let stage = self.progression.stage(&query.event_id).await?;
        let count = match query.round {
            Round::Round1 => self
                .progression
                .round_one_results(&query.event_id)
                .await?
                .map_or(0, |set| set.entries.len()),
            Round::Round2 => self
                .progression
                .round_two_results(&query.event_id)
                .await?
                .map_or(0, |set| set.entries.len()),
        };
        let calculated = stage.round_calculated(query.round) && count > 0;

        let teams = self.teams.list_by_event(&query.event_id).await?;
        let expected_teams = match query.round {
            Round::Round1 => teams.len(),
            Round::Round2 => teams
                .iter()
                .filter(|t| !t.allocated_judges().is_empty(Round::Round2))
                .count(),
        };

        let finalized = self
            .scores
            .list_finalized(&query.event_id, query.round)
            .await?;
        let scored_teams: BTreeSet<TeamId> =
            finalized.iter().map(|s| s.key().team_id).collect();

        Ok(RoundStatus {
            round: query.round,
            calculated,
            count,
            scored_teams: scored_teams.len(),
            expected_teams,
        })
    }
}
