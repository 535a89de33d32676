//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' must be a multiple of {step}, got {actual}")]
    InvalidIncrement {
        field: String,
        step: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid increment validation error.
    pub fn invalid_increment(field: impl Into<String>, step: f64, actual: f64) -> Self {
        ValidationError::InvalidIncrement {
            field: field.into(),
            step,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    OutOfRange,
    IncompleteScoring,

    // Not found errors
    EventNotFound,
    TeamNotFound,
    JudgeNotFound,
    ScoreNotFound,

    // State conflicts
    AlreadyFinalized,
    AlreadySetup,
    AlreadyCalculated,
    RoundNotReady,
    InvalidStateTransition,

    // Round transition guards
    PreconditionNotMet,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // Infrastructure errors
    StorageError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::IncompleteScoring => "INCOMPLETE_SCORING",
            ErrorCode::EventNotFound => "EVENT_NOT_FOUND",
            ErrorCode::TeamNotFound => "TEAM_NOT_FOUND",
            ErrorCode::JudgeNotFound => "JUDGE_NOT_FOUND",
            ErrorCode::ScoreNotFound => "SCORE_NOT_FOUND",
            ErrorCode::AlreadyFinalized => "ALREADY_FINALIZED",
            ErrorCode::AlreadySetup => "ALREADY_SETUP",
            ErrorCode::AlreadyCalculated => "ALREADY_CALCULATED",
            ErrorCode::RoundNotReady => "ROUND_NOT_READY",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::PreconditionNotMet => "PRECONDITION_NOT_MET",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a precondition error that carries the unmet count.
    ///
    /// Progress displays use the count to show how far the caller is from
    /// satisfying the guard.
    pub fn precondition(message: impl Into<String>, unmet: usize) -> Self {
        Self::new(ErrorCode::PreconditionNotMet, message)
            .with_detail("unmet_count", unmet.to_string())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the unmet count attached by [`DomainError::precondition`], if any.
    pub fn unmet_count(&self) -> Option<usize> {
        self.details.get("unmet_count").and_then(|v| v.parse().ok())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::OutOfRange { .. } | ValidationError::InvalidIncrement { .. } => {
                ErrorCode::OutOfRange
            }
            _ => ErrorCode::ValidationFailed,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("team_name");
        assert_eq!(format!("{}", err), "Field 'team_name' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("bonus", 0.0, 5.0, 6.5);
        assert_eq!(
            format!("{}", err),
            "Field 'bonus' must be between 0 and 5, got 6.5"
        );
    }

    #[test]
    fn validation_error_invalid_increment_displays_correctly() {
        let err = ValidationError::invalid_increment("bonus", 0.5, 0.3);
        assert_eq!(
            format!("{}", err),
            "Field 'bonus' must be a multiple of 0.5, got 0.3"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::TeamNotFound, "Team not found");
        assert_eq!(format!("{}", err), "[TEAM_NOT_FOUND] Team not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "bonus")
            .with_detail("reason", "out of range");

        assert_eq!(err.details.get("field"), Some(&"bonus".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"out of range".to_string()));
    }

    #[test]
    fn precondition_error_carries_unmet_count() {
        let err = DomainError::precondition("3 teams still unscored", 3);
        assert_eq!(err.code, ErrorCode::PreconditionNotMet);
        assert_eq!(err.unmet_count(), Some(3));
    }

    #[test]
    fn out_of_range_validation_maps_to_out_of_range_code() {
        let err: DomainError = ValidationError::out_of_range("bonus", 0.0, 5.0, 9.0).into();
        assert_eq!(err.code, ErrorCode::OutOfRange);
    }

    #[test]
    fn empty_field_validation_maps_to_validation_failed_code() {
        let err: DomainError = ValidationError::empty_field("name").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::AlreadyFinalized), "ALREADY_FINALIZED");
        assert_eq!(format!("{}", ErrorCode::PreconditionNotMet), "PRECONDITION_NOT_MET");
    }
}
