//! Round 2 allocation engine.
//!
//! Round 1 allocations are seeded externally by admin action; this engine
//! computes the Round 2 allocation from Round 1 results plus the external
//! judge roster. It is a pure function of its inputs: the same results,
//! roster, and top-N always produce the same plan.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::foundation::{DomainKey, JudgeId, Round, TeamId};
use crate::domain::judge::Judge;
use crate::domain::progression::RoundOneResultSet;

/// A team selected for Round 2, with its selection rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTeam {
    pub team_id: TeamId,
    pub domain: DomainKey,
    /// The team's Round 1 rank within its domain.
    pub domain_rank: u32,
}

/// The computed Round 2 allocation.
///
/// Selection doubles as the qualification gate: selected teams qualify,
/// every other team in the Round 1 results is eliminated. The caller
/// turns those lists into explicit status events; the engine itself
/// mutates nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    /// Judge set per selected team. Every external judge appears in every
    /// selected team's set (full fan-out, not partitioned).
    pub assignments: BTreeMap<TeamId, BTreeSet<JudgeId>>,

    /// Selected teams in domain order, rank order within domain.
    pub selected: Vec<SelectedTeam>,

    /// Teams present in the Round 1 results but not selected.
    pub eliminated: Vec<SelectedTeam>,
}

impl AllocationPlan {
    /// Returns the number of selected teams.
    pub fn team_count(&self) -> usize {
        self.assignments.len()
    }

    /// Returns the judge panel size (uniform across selected teams).
    pub fn panel_size(&self) -> usize {
        self.assignments.values().next().map_or(0, BTreeSet::len)
    }
}

/// Computes the Round 2 allocation.
///
/// Per domain, the top `per_domain_top_n` teams by Round 1 rank advance
/// (rank order is average score descending with documented tie-breaks).
/// Every judge in the roster whose round policy covers Round 2 is
/// assigned to every selected team; judges of the wrong pool are ignored.
pub fn plan_round_two(
    round1: &RoundOneResultSet,
    judges: &[Judge],
    per_domain_top_n: usize,
) -> AllocationPlan {
    let panel: BTreeSet<JudgeId> = judges
        .iter()
        .filter(|j| j.scores_round(Round::Round2))
        .map(|j| *j.id())
        .collect();

    let mut by_domain: BTreeMap<DomainKey, Vec<SelectedTeam>> = BTreeMap::new();
    for entry in &round1.entries {
        by_domain
            .entry(entry.domain.clone())
            .or_default()
            .push(SelectedTeam {
                team_id: entry.team_id,
                domain: entry.domain.clone(),
                domain_rank: entry.rank,
            });
    }

    let mut assignments = BTreeMap::new();
    let mut selected = Vec::new();
    let mut eliminated = Vec::new();
    for (_, mut teams) in by_domain {
        teams.sort_by_key(|t| t.domain_rank);
        for (index, team) in teams.into_iter().enumerate() {
            if index < per_domain_top_n {
                assignments.insert(team.team_id, panel.clone());
                selected.push(team);
            } else {
                eliminated.push(team);
            }
        }
    }

    AllocationPlan {
        assignments,
        selected,
        eliminated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{JudgeType, Timestamp};
    use crate::domain::progression::{ResultSet, RoundOneEntry};

    fn entry(domain: &str, rank: u32, average: f64) -> RoundOneEntry {
        RoundOneEntry {
            team_id: TeamId::new(),
            domain: DomainKey::new(domain).unwrap(),
            total_score: average * 2.0,
            average_score: average,
            judge_count: 2,
            rank,
        }
    }

    fn results(entries: Vec<RoundOneEntry>) -> RoundOneResultSet {
        ResultSet {
            round: Round::Round1,
            computed_at: Timestamp::now(),
            entries,
        }
    }

    fn external(name: &str) -> Judge {
        Judge::new(JudgeId::new(), name, JudgeType::External).unwrap()
    }

    #[test]
    fn selects_top_n_per_domain_with_full_fan_out() {
        let round1 = results(vec![
            entry("fintech", 1, 90.0),
            entry("fintech", 2, 80.0),
            entry("fintech", 3, 70.0),
            entry("fintech", 4, 60.0),
            entry("health", 1, 85.0),
            entry("health", 2, 75.0),
            entry("health", 3, 65.0),
            entry("health", 4, 55.0),
        ]);
        let judges = vec![external("Ms. Vega"), external("Mr. Ito"), external("Dr. Khan")];

        let plan = plan_round_two(&round1, &judges, 2);

        assert_eq!(plan.team_count(), 4);
        assert_eq!(plan.panel_size(), 3);
        assert_eq!(plan.eliminated.len(), 4);
        // Every external judge appears in every selected team's set.
        for judge in &judges {
            for set in plan.assignments.values() {
                assert!(set.contains(judge.id()));
            }
        }
    }

    #[test]
    fn selection_follows_domain_rank() {
        let first = entry("fintech", 1, 90.0);
        let second = entry("fintech", 2, 80.0);
        let third = entry("fintech", 3, 70.0);
        let round1 = results(vec![third.clone(), first.clone(), second.clone()]);

        let plan = plan_round_two(&round1, &[external("Ms. Vega")], 2);

        let selected: Vec<TeamId> = plan.selected.iter().map(|t| t.team_id).collect();
        assert_eq!(selected, vec![first.team_id, second.team_id]);
        assert_eq!(plan.eliminated[0].team_id, third.team_id);
    }

    #[test]
    fn internal_judges_in_the_roster_are_ignored() {
        let round1 = results(vec![entry("fintech", 1, 90.0)]);
        let internal = Judge::new(JudgeId::new(), "Dr. Rao", JudgeType::Internal).unwrap();
        let ext = external("Ms. Vega");

        let plan = plan_round_two(&round1, &[internal.clone(), ext.clone()], 1);

        let set = &plan.assignments[&round1.entries[0].team_id];
        assert!(set.contains(ext.id()));
        assert!(!set.contains(internal.id()));
    }

    #[test]
    fn identical_inputs_produce_identical_plans() {
        let round1 = results(vec![
            entry("fintech", 1, 90.0),
            entry("fintech", 2, 80.0),
            entry("health", 1, 85.0),
        ]);
        let judges = vec![external("Ms. Vega"), external("Mr. Ito")];

        let first = plan_round_two(&round1, &judges, 1);
        let second = plan_round_two(&round1, &judges, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn top_n_larger_than_domain_selects_everyone() {
        let round1 = results(vec![entry("fintech", 1, 90.0), entry("fintech", 2, 80.0)]);
        let plan = plan_round_two(&round1, &[external("Ms. Vega")], 10);
        assert_eq!(plan.team_count(), 2);
        assert!(plan.eliminated.is_empty());
    }

    #[test]
    fn empty_roster_yields_empty_panels() {
        let round1 = results(vec![entry("fintech", 1, 90.0)]);
        let plan = plan_round_two(&round1, &[], 1);
        assert_eq!(plan.team_count(), 1);
        assert_eq!(plan.panel_size(), 0);
    }
}
