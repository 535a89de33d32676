//! Judge aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, JudgeId, JudgeType, Round, ValidationError};

/// A judge registered for one or more events.
///
/// # Invariants
///
/// - Internal judges participate only in Round 1, External judges only in
///   Round 2; the type's round policy is the single source of that rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judge {
    /// Unique identifier for this judge.
    id: JudgeId,

    /// Judge display name.
    name: String,

    /// Which judge pool this judge belongs to.
    judge_type: JudgeType,

    /// Free-text expertise areas.
    expertise: Vec<String>,

    /// Events this judge is assigned to.
    assigned_event_ids: Vec<EventId>,
}

impl Judge {
    /// Create a new judge.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is empty
    pub fn new(
        id: JudgeId,
        name: impl Into<String>,
        judge_type: JudgeType,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::empty_field("judge_name"));
        }
        Ok(Self {
            id,
            name,
            judge_type,
            expertise: Vec::new(),
            assigned_event_ids: Vec::new(),
        })
    }

    /// Adds expertise areas.
    pub fn with_expertise(mut self, expertise: Vec<String>) -> Self {
        self.expertise = expertise;
        self
    }

    /// Assigns this judge to an event.
    pub fn assign_event(mut self, event_id: EventId) -> Self {
        if !self.assigned_event_ids.contains(&event_id) {
            self.assigned_event_ids.push(event_id);
        }
        self
    }

    /// Returns the judge id.
    pub fn id(&self) -> &JudgeId {
        &self.id
    }

    /// Returns the judge display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the judge pool membership.
    pub fn judge_type(&self) -> JudgeType {
        self.judge_type
    }

    /// Returns the expertise areas.
    pub fn expertise(&self) -> &[String] {
        &self.expertise
    }

    /// Returns the assigned event ids.
    pub fn assigned_event_ids(&self) -> &[EventId] {
        &self.assigned_event_ids
    }

    /// Returns true if this judge is assigned to the event.
    pub fn is_assigned_to(&self, event_id: &EventId) -> bool {
        self.assigned_event_ids.contains(event_id)
    }

    /// Returns true if this judge's pool may score the round.
    pub fn scores_round(&self, round: Round) -> bool {
        self.judge_type.scores_round(round)
    }
}
