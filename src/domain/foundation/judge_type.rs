//! Judge type and its round policy.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Round;

/// The two judge pools of the competition.
///
/// The type doubles as a round policy: instead of branching on
/// Internal/External throughout the engine, callers ask the type which
/// round it scores and validate once at the edge. A judge is never
/// allocated to a round inconsistent with its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JudgeType {
    /// In-house judges; they participate only in Round 1.
    Internal,
    /// Invited external judges; they participate only in Round 2.
    External,
}

impl JudgeType {
    /// Returns the single round this judge type may score.
    pub fn scoring_round(&self) -> Round {
        match self {
            JudgeType::Internal => Round::Round1,
            JudgeType::External => Round::Round2,
        }
    }

    /// Returns true if this judge type may score the given round.
    pub fn scores_round(&self, round: Round) -> bool {
        self.scoring_round() == round
    }

    /// Returns the judge pool that scores the given round.
    pub fn for_round(round: Round) -> Self {
        match round {
            Round::Round1 => JudgeType::Internal,
            Round::Round2 => JudgeType::External,
        }
    }
}

impl fmt::Display for JudgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JudgeType::Internal => "Internal",
            JudgeType::External => "External",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_judges_score_round_one() {
        assert_eq!(JudgeType::Internal.scoring_round(), Round::Round1);
        assert!(JudgeType::Internal.scores_round(Round::Round1));
        assert!(!JudgeType::Internal.scores_round(Round::Round2));
    }

    #[test]
    fn external_judges_score_round_two() {
        assert_eq!(JudgeType::External.scoring_round(), Round::Round2);
        assert!(JudgeType::External.scores_round(Round::Round2));
        assert!(!JudgeType::External.scores_round(Round::Round1));
    }

    #[test]
    fn for_round_inverts_scoring_round() {
        for round in Round::ALL {
            assert_eq!(JudgeType::for_round(round).scoring_round(), round);
        }
    }
}
