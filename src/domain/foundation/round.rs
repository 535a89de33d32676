//! Round identity for the two-phase judging competition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A judging phase.
///
/// Round 1 is the broad internal-judge phase; Round 2 is the external-judge
/// phase over the qualified subset. Keeping this a closed enum (rather than
/// a string key) makes illegal rounds unrepresentable in allocation maps
/// and score keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Round {
    #[serde(rename = "round1")]
    Round1,
    #[serde(rename = "round2")]
    Round2,
}

impl Round {
    /// Both rounds, in order.
    pub const ALL: [Round; 2] = [Round::Round1, Round::Round2];

    /// Returns the display label used in reports ("Round 1" / "Round 2").
    pub fn label(&self) -> &'static str {
        match self {
            Round::Round1 => "Round 1",
            Round::Round2 => "Round 2",
        }
    }

    /// Returns the storage key ("round1" / "round2").
    pub fn key(&self) -> &'static str {
        match self {
            Round::Round1 => "round1",
            Round::Round2 => "round2",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Round {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round1" | "Round 1" => Ok(Round::Round1),
            "round2" | "Round 2" => Ok(Round::Round2),
            other => Err(ValidationError::invalid_format(
                "round",
                format!("unknown round '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_labels_match_report_wording() {
        assert_eq!(Round::Round1.label(), "Round 1");
        assert_eq!(Round::Round2.label(), "Round 2");
    }

    #[test]
    fn round_keys_are_stable() {
        assert_eq!(Round::Round1.key(), "round1");
        assert_eq!(Round::Round2.key(), "round2");
    }

    #[test]
    fn round_parses_both_spellings() {
        assert_eq!("round1".parse::<Round>().unwrap(), Round::Round1);
        assert_eq!("Round 2".parse::<Round>().unwrap(), Round::Round2);
    }

    #[test]
    fn round_rejects_unknown_values() {
        assert!("round3".parse::<Round>().is_err());
    }

    #[test]
    fn round_serializes_to_storage_key() {
        assert_eq!(serde_json::to_string(&Round::Round1).unwrap(), "\"round1\"");
        assert_eq!(serde_json::to_string(&Round::Round2).unwrap(), "\"round2\"");
    }

    #[test]
    fn round_ordering_puts_round1_first() {
        assert!(Round::Round1 < Round::Round2);
    }
}
