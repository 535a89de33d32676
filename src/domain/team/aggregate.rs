//! Team aggregate entity.
//!
//! A team belongs to exactly one event and one domain. Judge allocations
//! and qualification status change only through the allocation engine and
//! its emitted events.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{
    DomainError, DomainKey, ErrorCode, EventId, JudgeId, Round, StateMachine, TeamId, Timestamp,
    ValidationError,
};

use super::{QualificationStatus, RoundAllocations, TeamMember};

/// Team aggregate.
///
/// # Invariants
///
/// - belongs to exactly one event and one domain
/// - allocation sets grow only through the allocation entry points
/// - qualification transitions follow the `QualificationStatus` machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier for this team.
    id: TeamId,

    /// Owning event.
    event_id: EventId,

    /// Competition domain the team entered.
    domain: DomainKey,

    /// Team display name.
    team_name: String,

    /// The problem statement the team pitched.
    problem_statement: String,

    /// Longer idea description, when registered.
    idea_description: Option<String>,

    /// Registered members.
    members: Vec<TeamMember>,

    /// Standing derived from round outcomes.
    qualification_status: QualificationStatus,

    /// Judges assigned per round.
    allocated_judges: RoundAllocations,

    /// When the team registered.
    created_at: Timestamp,
}

impl Team {
    /// Create a new unscored team with empty allocations.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the team name or problem statement is empty
    pub fn new(
        id: TeamId,
        event_id: EventId,
        domain: DomainKey,
        team_name: impl Into<String>,
        problem_statement: impl Into<String>,
        members: Vec<TeamMember>,
    ) -> Result<Self, ValidationError> {
        let team_name = team_name.into();
        if team_name.is_empty() {
            return Err(ValidationError::empty_field("team_name"));
        }
        let problem_statement = problem_statement.into();
        if problem_statement.is_empty() {
            return Err(ValidationError::empty_field("problem_statement"));
        }

        Ok(Self {
            id,
            event_id,
            domain,
            team_name,
            problem_statement,
            idea_description: None,
            members,
            qualification_status: QualificationStatus::Unscored,
            allocated_judges: RoundAllocations::new(),
            created_at: Timestamp::now(),
        })
    }

    /// Attaches the longer idea description.
    pub fn with_idea_description(mut self, description: impl Into<String>) -> Self {
        self.idea_description = Some(description.into());
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the team id.
    pub fn id(&self) -> &TeamId {
        &self.id
    }

    /// Returns the owning event id.
    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Returns the team's domain key.
    pub fn domain(&self) -> &DomainKey {
        &self.domain
    }

    /// Returns the team display name.
    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    /// Returns the pitched problem statement.
    pub fn problem_statement(&self) -> &str {
        &self.problem_statement
    }

    /// Returns the idea description, when registered.
    pub fn idea_description(&self) -> Option<&str> {
        self.idea_description.as_deref()
    }

    /// Returns the registered members.
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Returns the current qualification status.
    pub fn qualification_status(&self) -> QualificationStatus {
        self.qualification_status
    }

    /// Returns the per-round judge allocations.
    pub fn allocated_judges(&self) -> &RoundAllocations {
        &self.allocated_judges
    }

    /// Returns when the team registered.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations (allocation engine entry points)
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the judge set for a round.
    pub fn set_round_allocation(&mut self, round: Round, judges: BTreeSet<JudgeId>) {
        self.allocated_judges.set_round(round, judges);
    }

    /// Applies a qualification transition.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the status machine forbids the move
    pub fn apply_qualification(
        &mut self,
        status: QualificationStatus,
    ) -> Result<(), DomainError> {
        self.qualification_status = self
            .qualification_status
            .transition_to(status)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        Ok(())
    }

    /// Returns true if the judge is allocated to this team for the round.
    pub fn is_allocated(&self, round: Round, judge: &JudgeId) -> bool {
        self.allocated_judges.contains(round, judge)
    }
}
