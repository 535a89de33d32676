//! Team-level score aggregation and ranking.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{CriterionId, JudgeId, Round, TeamId, Timestamp};

use super::{round_to_1dp, BonusScore, Score};

/// One judge's contribution inside a team aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeScoreLine {
    pub judge_id: JudgeId,
    pub criterion_values: BTreeMap<CriterionId, f64>,
    pub bonus: BonusScore,
    pub total_score: f64,
    pub submitted_at: Timestamp,
}

/// Derived per-team summary across judges for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAggregate {
    pub team_id: TeamId,
    pub round: Round,

    /// Sum of finalized totals, rounded to one decimal.
    pub total_score: f64,

    /// Arithmetic mean of finalized totals; 0 when no score is in yet.
    pub average_score: f64,

    /// Finalized scores received so far.
    pub scores_received: usize,

    /// Size of the team's allocation set for the round. This is the
    /// completion-rate denominator, not the submitted count.
    pub total_judges: usize,

    /// Per-judge breakdown, ordered by judge id.
    pub per_judge: Vec<JudgeScoreLine>,
}

impl TeamAggregate {
    /// Returns true once every allocated judge has finalized.
    pub fn is_complete(&self) -> bool {
        self.total_judges > 0 && self.scores_received >= self.total_judges
    }
}

/// Collapses judges' scores for a team into a team aggregate.
///
/// Only finalized scores whose key matches `(team_id, round)` contribute;
/// drafts and other teams' scores are ignored however many are passed.
pub fn aggregate_team(
    team_id: TeamId,
    round: Round,
    scores: &[Score],
    total_judges: usize,
) -> TeamAggregate {
    let mut per_judge: Vec<JudgeScoreLine> = scores
        .iter()
        .filter(|s| s.is_finalized() && s.key().team_id == team_id && s.key().round == round)
        .map(|s| JudgeScoreLine {
            judge_id: s.key().judge_id,
            criterion_values: s.criterion_values().clone(),
            bonus: s.bonus(),
            total_score: s.total_score(),
            submitted_at: *s.submitted_at(),
        })
        .collect();
    per_judge.sort_by(|a, b| a.judge_id.cmp(&b.judge_id));

    let scores_received = per_judge.len();
    let sum: f64 = per_judge.iter().map(|line| line.total_score).sum();
    let average_score = if scores_received > 0 {
        sum / scores_received as f64
    } else {
        0.0
    };

    TeamAggregate {
        team_id,
        round,
        total_score: round_to_1dp(sum),
        average_score,
        scores_received,
        total_judges,
        per_judge,
    }
}

/// Orders aggregates for ranking.
///
/// Round 1 ranks by average score (judge panels vary per team); Round 2
/// ranks by total score (a uniform external panel scores every team).
/// Ties break by the other measure descending, then team id ascending,
/// so the order is a documented total order rather than input order.
pub fn sort_for_ranking(aggregates: &mut [TeamAggregate], round: Round) {
    aggregates.sort_by(|a, b| {
        let (primary_a, primary_b, secondary_a, secondary_b) = match round {
            Round::Round1 => (a.average_score, b.average_score, a.total_score, b.total_score),
            Round::Round2 => (a.total_score, b.total_score, a.average_score, b.average_score),
        };
        primary_b
            .total_cmp(&primary_a)
            .then(secondary_b.total_cmp(&secondary_a))
            .then(a.team_id.cmp(&b.team_id))
    });
}
