//! Scoring-specific error types.

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, JudgeId, JudgeType, Round, TeamId, ValidationError,
};

/// Scoring-specific errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Event was not found.
    EventNotFound(EventId),
    /// Team was not found.
    TeamNotFound(TeamId),
    /// Judge was not found.
    JudgeNotFound(JudgeId),
    /// Actor is not permitted to submit this score.
    Forbidden(String),
    /// The judge's pool does not score this round.
    RoundMismatch { judge_type: JudgeType, round: Round },
    /// The judge is not allocated to the team for the round.
    NotAllocated {
        judge_id: JudgeId,
        team_id: TeamId,
        round: Round,
    },
    /// A criterion value or bonus failed validation.
    OutOfRange(String),
    /// A submitted criterion id is not configured on the event.
    UnknownCriterion(String),
    /// Finalization attempted without a value for every criterion.
    IncompleteScoring { missing: Vec<String> },
    /// A finalized score already exists for the (team, judge, round) key.
    AlreadyFinalized {
        team_id: TeamId,
        judge_id: JudgeId,
        round: Round,
    },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ScoringError {
    pub fn out_of_range(message: impl Into<String>) -> Self {
        ScoringError::OutOfRange(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ScoringError::Forbidden(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ScoringError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ScoringError::EventNotFound(_) => ErrorCode::EventNotFound,
            ScoringError::TeamNotFound(_) => ErrorCode::TeamNotFound,
            ScoringError::JudgeNotFound(_) => ErrorCode::JudgeNotFound,
            ScoringError::Forbidden(_) => ErrorCode::Forbidden,
            ScoringError::RoundMismatch { .. } => ErrorCode::Forbidden,
            ScoringError::NotAllocated { .. } => ErrorCode::Forbidden,
            ScoringError::OutOfRange(_) => ErrorCode::OutOfRange,
            ScoringError::UnknownCriterion(_) => ErrorCode::ValidationFailed,
            ScoringError::IncompleteScoring { .. } => ErrorCode::IncompleteScoring,
            ScoringError::AlreadyFinalized { .. } => ErrorCode::AlreadyFinalized,
            ScoringError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ScoringError::EventNotFound(id) => format!("Event not found: {}", id),
            ScoringError::TeamNotFound(id) => format!("Team not found: {}", id),
            ScoringError::JudgeNotFound(id) => format!("Judge not found: {}", id),
            ScoringError::Forbidden(msg) => msg.clone(),
            ScoringError::RoundMismatch { judge_type, round } => {
                format!("{} judges do not score {}", judge_type, round)
            }
            ScoringError::NotAllocated {
                judge_id,
                team_id,
                round,
            } => format!(
                "Judge {} is not allocated to team {} for {}",
                judge_id, team_id, round
            ),
            ScoringError::OutOfRange(msg) => msg.clone(),
            ScoringError::UnknownCriterion(id) => {
                format!("Criterion '{}' is not configured for this event", id)
            }
            ScoringError::IncompleteScoring { missing } => format!(
                "All criteria must be scored before finalization; missing: {}",
                missing.join(", ")
            ),
            ScoringError::AlreadyFinalized {
                team_id,
                judge_id,
                round,
            } => format!(
                "A finalized score already exists for team {} by judge {} in {}",
                team_id, judge_id, round
            ),
            ScoringError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ScoringError {}

impl From<ValidationError> for ScoringError {
    fn from(err: ValidationError) -> Self {
        // Value-object construction inside scoring only fails on the
        // range/increment grid.
        ScoringError::OutOfRange(err.to_string())
    }
}

impl From<DomainError> for ScoringError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::OutOfRange => ScoringError::OutOfRange(err.to_string()),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => ScoringError::Forbidden(err.to_string()),
            _ => ScoringError::Infrastructure(err.to_string()),
        }
    }
}
