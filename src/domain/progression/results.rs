//! Derived round result snapshots.
//!
//! Result sets are computed, never edited: each calculation produces a
//! fresh versioned snapshot that atomically replaces the prior one, so
//! "already calculated" checks and rollback stay trivial.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{DomainKey, Round, TeamId, Timestamp};
use crate::domain::scoring::{aggregate_team, sort_for_ranking, Score, TeamAggregate};
use crate::domain::team::Team;

/// One team's Round 1 outcome: aggregate and rank within its domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOneEntry {
    pub team_id: TeamId,
    pub domain: DomainKey,
    /// Sum of finalized judge totals.
    pub total_score: f64,
    /// Mean of finalized judge totals; the Round 1 ranking measure.
    pub average_score: f64,
    /// Contributing judge count.
    pub judge_count: usize,
    /// Rank within the domain, 1-based.
    pub rank: u32,
}

/// One team's Round 2 outcome: aggregate and overall cohort rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTwoEntry {
    pub team_id: TeamId,
    pub domain: DomainKey,
    /// Sum of finalized external-judge totals; the Round 2 ranking measure.
    pub total_score: f64,
    pub average_score: f64,
    pub judge_count: usize,
    /// Rank among the whole Round 2 cohort, 1-based.
    pub rank: u32,
}

/// A versioned snapshot of one round's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet<E> {
    pub round: Round,
    pub computed_at: Timestamp,
    pub entries: Vec<E>,
}

pub type RoundOneResultSet = ResultSet<RoundOneEntry>;
pub type RoundTwoResultSet = ResultSet<RoundTwoEntry>;

impl RoundOneResultSet {
    /// Returns this snapshot's entries for one domain, rank order.
    pub fn for_domain<'a>(&'a self, domain: &DomainKey) -> Vec<&'a RoundOneEntry> {
        self.entries.iter().filter(|e| &e.domain == domain).collect()
    }
}

fn entry_from_aggregate(agg: &TeamAggregate, domain: DomainKey, rank: u32) -> RoundOneEntry {
    RoundOneEntry {
        team_id: agg.team_id,
        domain,
        total_score: agg.total_score,
        average_score: agg.average_score,
        judge_count: agg.scores_received,
        rank,
    }
}

/// Computes the Round 1 result snapshot for every domain.
///
/// Teams group by domain; each team aggregates over its finalized Round 1
/// scores with its allocation size as the judge denominator, and ranks
/// within its domain by average score descending (ties: total descending,
/// then team id).
pub fn build_round_one_results(teams: &[Team], scores: &[Score]) -> RoundOneResultSet {
    let mut by_domain: BTreeMap<DomainKey, Vec<TeamAggregate>> = BTreeMap::new();
    for team in teams {
        let agg = aggregate_team(
            *team.id(),
            Round::Round1,
            scores,
            team.allocated_judges().count(Round::Round1),
        );
        by_domain.entry(team.domain().clone()).or_default().push(agg);
    }

    let mut entries = Vec::new();
    for (domain, mut aggs) in by_domain {
        sort_for_ranking(&mut aggs, Round::Round1);
        for (index, agg) in aggs.iter().enumerate() {
            entries.push(entry_from_aggregate(agg, domain.clone(), index as u32 + 1));
        }
    }

    ResultSet {
        round: Round::Round1,
        computed_at: Timestamp::now(),
        entries,
    }
}

/// Computes the Round 2 result snapshot over the allocated cohort.
///
/// Only teams with a Round 2 allocation participate; they rank as one
/// cohort by total score descending (a uniform external panel scores
/// every team, so totals compare directly).
pub fn build_round_two_results(teams: &[Team], scores: &[Score]) -> RoundTwoResultSet {
    let cohort: Vec<&Team> = teams
        .iter()
        .filter(|t| !t.allocated_judges().is_empty(Round::Round2))
        .collect();
    let domains: BTreeMap<TeamId, DomainKey> = cohort
        .iter()
        .map(|t| (*t.id(), t.domain().clone()))
        .collect();

    let mut aggs: Vec<TeamAggregate> = cohort
        .iter()
        .map(|t| {
            aggregate_team(
                *t.id(),
                Round::Round2,
                scores,
                t.allocated_judges().count(Round::Round2),
            )
        })
        .collect();
    sort_for_ranking(&mut aggs, Round::Round2);

    let entries = aggs
        .iter()
        .enumerate()
        .map(|(index, agg)| RoundTwoEntry {
            team_id: agg.team_id,
            domain: domains[&agg.team_id].clone(),
            total_score: agg.total_score,
            average_score: agg.average_score,
            judge_count: agg.scores_received,
            rank: index as u32 + 1,
        })
        .collect();

    ResultSet {
        round: Round::Round2,
        computed_at: Timestamp::now(),
        entries,
    }
}
