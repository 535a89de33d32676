//! Per-round judge allocations for a team.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{JudgeId, Round};

/// The judges assigned to a team, per round.
///
/// A closed two-slot structure rather than a string-keyed map, so a
/// round that does not exist cannot be allocated. Sets start empty and
/// grow only through the allocation engine (Round 1 seeding goes through
/// the same entry point).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundAllocations {
    round1: BTreeSet<JudgeId>,
    round2: BTreeSet<JudgeId>,
}

impl RoundAllocations {
    /// Creates empty allocations for both rounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the judge set for the given round.
    pub fn for_round(&self, round: Round) -> &BTreeSet<JudgeId> {
        match round {
            Round::Round1 => &self.round1,
            Round::Round2 => &self.round2,
        }
    }

    /// Replaces the judge set for the given round.
    pub fn set_round(&mut self, round: Round, judges: BTreeSet<JudgeId>) {
        match round {
            Round::Round1 => self.round1 = judges,
            Round::Round2 => self.round2 = judges,
        }
    }

    /// Adds a single judge to the given round's set.
    pub fn assign(&mut self, round: Round, judge: JudgeId) {
        match round {
            Round::Round1 => self.round1.insert(judge),
            Round::Round2 => self.round2.insert(judge),
        };
    }

    /// Returns true if the judge is allocated to this team for the round.
    pub fn contains(&self, round: Round, judge: &JudgeId) -> bool {
        self.for_round(round).contains(judge)
    }

    /// Returns the allocation size for the round.
    ///
    /// This is the denominator for completion-rate displays: the number of
    /// judges expected to score, not the number that have.
    pub fn count(&self, round: Round) -> usize {
        self.for_round(round).len()
    }

    /// Returns true if no judges are allocated for the round.
    pub fn is_empty(&self, round: Round) -> bool {
        self.for_round(round).is_empty()
    }
}
