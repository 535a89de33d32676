//! Scoring criterion value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CriterionId, ValidationError};

/// A named scoring dimension with a maximum point value.
///
/// Criteria are configured per event and ordered; judges must provide a
/// value for every criterion before a score can be finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    id: CriterionId,
    name: String,
    max_score: f64,
}

impl Criterion {
    /// Creates a new criterion.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is empty
    /// - `OutOfRange` if max_score is not strictly positive
    pub fn new(
        id: CriterionId,
        name: impl Into<String>,
        max_score: f64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::empty_field("criterion_name"));
        }
        if !max_score.is_finite() || max_score <= 0.0 {
            return Err(ValidationError::out_of_range(
                "max_score",
                0.0,
                f64::MAX,
                max_score,
            ));
        }
        Ok(Self {
            id,
            name,
            max_score,
        })
    }

    /// Returns the criterion id.
    pub fn id(&self) -> &CriterionId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the maximum point value.
    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    /// Returns true if the value lies within `[0, max_score]`.
    pub fn accepts(&self, value: f64) -> bool {
        value.is_finite() && (0.0..=self.max_score).contains(&value)
    }
}
