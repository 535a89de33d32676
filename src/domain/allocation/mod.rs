//! Allocation module: Round 2 judge-to-team assignment.

mod engine;

pub use engine::{plan_round_two, AllocationPlan, SelectedTeam};
