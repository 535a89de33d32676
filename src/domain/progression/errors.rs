//! Round progression error types.

use crate::domain::foundation::{DomainError, ErrorCode, EventId, JudgeId, Round};

use super::RoundStage;

/// Errors from round calculation and setup transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressionError {
    /// Event was not found.
    EventNotFound(EventId),
    /// A judge named in the setup roster was not found.
    JudgeNotFound(JudgeId),
    /// Actor lacks the admin role.
    Forbidden,
    /// A transition guard failed; carries the unmet count for progress UIs.
    PreconditionNotMet { message: String, unmet: usize },
    /// The round's results were already calculated.
    AlreadyCalculated(Round),
    /// Round 2 setup already ran.
    AlreadySetup,
    /// The event is not in the stage this transition requires.
    RoundNotReady {
        required: RoundStage,
        actual: RoundStage,
    },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ProgressionError {
    pub fn precondition(message: impl Into<String>, unmet: usize) -> Self {
        ProgressionError::PreconditionNotMet {
            message: message.into(),
            unmet,
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProgressionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProgressionError::EventNotFound(_) => ErrorCode::EventNotFound,
            ProgressionError::JudgeNotFound(_) => ErrorCode::JudgeNotFound,
            ProgressionError::Forbidden => ErrorCode::Forbidden,
            ProgressionError::PreconditionNotMet { .. } => ErrorCode::PreconditionNotMet,
            ProgressionError::AlreadyCalculated(_) => ErrorCode::AlreadyCalculated,
            ProgressionError::AlreadySetup => ErrorCode::AlreadySetup,
            ProgressionError::RoundNotReady { .. } => ErrorCode::RoundNotReady,
            ProgressionError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ProgressionError::EventNotFound(id) => format!("Event not found: {}", id),
            ProgressionError::JudgeNotFound(id) => format!("Judge not found: {}", id),
            ProgressionError::Forbidden => "Only admins may run round transitions".to_string(),
            ProgressionError::PreconditionNotMet { message, unmet } => {
                format!("{} ({} outstanding)", message, unmet)
            }
            ProgressionError::AlreadyCalculated(round) => {
                format!("{} results have already been calculated", round)
            }
            ProgressionError::AlreadySetup => "Round 2 has already been set up".to_string(),
            ProgressionError::RoundNotReady { required, actual } => {
                format!("Stage must be {} but is {}", required, actual)
            }
            ProgressionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ProgressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProgressionError {}

impl From<DomainError> for ProgressionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AlreadyCalculated => {
                // Store commits attach the losing round as a detail.
                let round = match err.details.get("round").map(String::as_str) {
                    Some("round2") => Round::Round2,
                    _ => Round::Round1,
                };
                ProgressionError::AlreadyCalculated(round)
            }
            ErrorCode::AlreadySetup => ProgressionError::AlreadySetup,
            ErrorCode::PreconditionNotMet => ProgressionError::PreconditionNotMet {
                message: err.message.clone(),
                unmet: err.unmet_count().unwrap_or(0),
            },
            ErrorCode::Forbidden | ErrorCode::Unauthorized => ProgressionError::Forbidden,
            _ => ProgressionError::Infrastructure(err.to_string()),
        }
    }
}
