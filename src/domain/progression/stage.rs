//! Round progression stage.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Round, StateMachine};

/// Where an event stands in the two-round flow.
///
/// Transitions are admin-triggered and synchronous; every guard is
/// re-evaluated on each status query, so the stage never advances on a
/// timer. `Round2SetupPending` is the in-flight setup stage traversed
/// inside the setup commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoundStage {
    #[default]
    Round1Open,
    Round1Calculated,
    Round2SetupPending,
    Round2SetupDone,
    Round2Calculated,
}

impl StateMachine for RoundStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RoundStage::*;
        matches!(
            (self, target),
            (Round1Open, Round1Calculated)
                | (Round1Calculated, Round2SetupPending)
                | (Round2SetupPending, Round2SetupDone)
                | (Round2SetupDone, Round2Calculated)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RoundStage::*;
        match self {
            Round1Open => vec![Round1Calculated],
            Round1Calculated => vec![Round2SetupPending],
            Round2SetupPending => vec![Round2SetupDone],
            Round2SetupDone => vec![Round2Calculated],
            Round2Calculated => vec![],
        }
    }
}

impl RoundStage {
    /// Returns true once the given round's results have been calculated.
    pub fn round_calculated(&self, round: Round) -> bool {
        match round {
            Round::Round1 => *self >= RoundStage::Round1Calculated,
            Round::Round2 => *self >= RoundStage::Round2Calculated,
        }
    }

    /// Returns true once Round 2 allocation has been set up.
    pub fn setup_done(&self) -> bool {
        *self >= RoundStage::Round2SetupDone
    }
}

impl fmt::Display for RoundStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundStage::Round1Open => "Round1Open",
            RoundStage::Round1Calculated => "Round1Calculated",
            RoundStage::Round2SetupPending => "Round2SetupPending",
            RoundStage::Round2SetupDone => "Round2SetupDone",
            RoundStage::Round2Calculated => "Round2Calculated",
        };
        write!(f, "{}", s)
    }
}
