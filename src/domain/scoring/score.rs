//! Score aggregate: one judge's evaluation of one team in one round.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::event::Event;
use crate::domain::foundation::{CriterionId, EventId, JudgeId, Round, TeamId, Timestamp};

use super::{BonusScore, ScoringError};

/// Rounds a point total to one decimal place.
pub fn round_to_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Composite identity of a score.
///
/// At most one finalized score may exist per key; two judges scoring the
/// same team concurrently use different keys and never conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreKey {
    pub event_id: EventId,
    pub team_id: TeamId,
    pub judge_id: JudgeId,
    pub round: Round,
}

/// A judge's per-criterion evaluation of a team.
///
/// # Lifecycle
///
/// Drafts are mutable and may omit criteria. Finalization requires a
/// value for every criterion configured on the event; once finalized the
/// score is immutable and the submission path never overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Composite identity.
    key: ScoreKey,

    /// Criterion id to awarded points.
    criterion_values: BTreeMap<CriterionId, f64>,

    /// Bonus marks on top of the criteria.
    bonus: BonusScore,

    /// `round_to_1dp(sum of criterion values + bonus)`.
    total_score: f64,

    /// Locked once true.
    is_finalized: bool,

    /// Last submission time.
    submitted_at: Timestamp,
}

impl Score {
    /// Creates a mutable draft.
    ///
    /// Values present are validated against the event's criteria; missing
    /// criteria are allowed until finalization.
    ///
    /// # Errors
    ///
    /// - `UnknownCriterion` for ids not configured on the event
    /// - `OutOfRange` for values outside `[0, max_score]`
    pub fn draft(
        key: ScoreKey,
        event: &Event,
        criterion_values: BTreeMap<CriterionId, f64>,
        bonus: BonusScore,
    ) -> Result<Self, ScoringError> {
        Self::validate_values(event, &criterion_values)?;
        let total_score = Self::compute_total(&criterion_values, bonus);
        Ok(Self {
            key,
            criterion_values,
            bonus,
            total_score,
            is_finalized: false,
            submitted_at: Timestamp::now(),
        })
    }

    /// Creates a finalized score in one step.
    ///
    /// # Errors
    ///
    /// Everything [`Score::draft`] rejects, plus `IncompleteScoring` when
    /// any configured criterion lacks a value.
    pub fn finalized(
        key: ScoreKey,
        event: &Event,
        criterion_values: BTreeMap<CriterionId, f64>,
        bonus: BonusScore,
    ) -> Result<Self, ScoringError> {
        Self::draft(key, event, criterion_values, bonus)?.finalize(event)
    }

    /// Locks this score as submitted.
    ///
    /// # Errors
    ///
    /// - `IncompleteScoring` when any configured criterion lacks a value
    pub fn finalize(mut self, event: &Event) -> Result<Self, ScoringError> {
        let missing = Self::missing_criteria(event, &self.criterion_values);
        if !missing.is_empty() {
            return Err(ScoringError::IncompleteScoring { missing });
        }
        self.is_finalized = true;
        self.submitted_at = Timestamp::now();
        Ok(self)
    }

    fn validate_values(
        event: &Event,
        values: &BTreeMap<CriterionId, f64>,
    ) -> Result<(), ScoringError> {
        for (id, value) in values {
            let criterion = event
                .criterion(id)
                .ok_or_else(|| ScoringError::UnknownCriterion(id.to_string()))?;
            if !criterion.accepts(*value) {
                return Err(ScoringError::out_of_range(format!(
                    "Criterion '{}' must be between 0 and {}, got {}",
                    criterion.name(),
                    criterion.max_score(),
                    value
                )));
            }
        }
        Ok(())
    }

    fn missing_criteria(event: &Event, values: &BTreeMap<CriterionId, f64>) -> Vec<String> {
        event
            .scoring_criteria()
            .iter()
            .filter(|c| !values.contains_key(c.id()))
            .map(|c| c.id().to_string())
            .collect()
    }

    fn compute_total(values: &BTreeMap<CriterionId, f64>, bonus: BonusScore) -> f64 {
        round_to_1dp(values.values().sum::<f64>() + bonus.points())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the composite identity.
    pub fn key(&self) -> &ScoreKey {
        &self.key
    }

    /// Returns the per-criterion values.
    pub fn criterion_values(&self) -> &BTreeMap<CriterionId, f64> {
        &self.criterion_values
    }

    /// Returns the awarded points for one criterion, if scored.
    pub fn criterion_value(&self, id: &CriterionId) -> Option<f64> {
        self.criterion_values.get(id).copied()
    }

    /// Returns the bonus.
    pub fn bonus(&self) -> BonusScore {
        self.bonus
    }

    /// Returns the rounded total.
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Returns true once the score is locked.
    pub fn is_finalized(&self) -> bool {
        self.is_finalized
    }

    /// Returns the last submission time.
    pub fn submitted_at(&self) -> &Timestamp {
        &self.submitted_at
    }
}
