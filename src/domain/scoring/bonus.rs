//! Bonus score value object (0–5 in half-point steps).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Optional bonus marks a judge may award on top of the criteria.
///
/// Stored as half-point steps (0..=10) so the 0.5 increment rule is
/// structural and no float drift can accumulate into totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BonusScore(u8);

/// Maximum bonus in points.
const MAX_POINTS: f64 = 5.0;
/// Half-point steps in the maximum.
const MAX_HALF_STEPS: u8 = 10;

impl BonusScore {
    /// No bonus.
    pub const ZERO: Self = Self(0);

    /// Maximum bonus (5.0).
    pub const MAX: Self = Self(MAX_HALF_STEPS);

    /// Creates a BonusScore from a point value.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if outside `[0, 5]`
    /// - `InvalidIncrement` if not a multiple of 0.5
    pub fn try_from_points(points: f64) -> Result<Self, ValidationError> {
        if !points.is_finite() || !(0.0..=MAX_POINTS).contains(&points) {
            return Err(ValidationError::out_of_range("bonus", 0.0, MAX_POINTS, points));
        }
        let half_steps = points * 2.0;
        if (half_steps - half_steps.round()).abs() > 1e-9 {
            return Err(ValidationError::invalid_increment("bonus", 0.5, points));
        }
        Ok(Self(half_steps.round() as u8))
    }

    /// Returns the bonus in points.
    pub fn points(&self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl TryFrom<f64> for BonusScore {
    type Error = ValidationError;

    fn try_from(points: f64) -> Result<Self, Self::Error> {
        Self::try_from_points(points)
    }
}

impl From<BonusScore> for f64 {
    fn from(bonus: BonusScore) -> Self {
        bonus.points()
    }
}

impl fmt::Display for BonusScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.points())
    }
}
