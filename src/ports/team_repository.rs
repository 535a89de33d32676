//! Team repository port.
//!
//! Teams are registered outside the engine; the engine reads them and
//! writes back allocation and qualification changes.

use std::collections::BTreeSet;

use crate::domain::foundation::{DomainError, EventId, JudgeId, Round, TeamId};
use crate::domain::team::{QualificationStatus, Team};
use async_trait::async_trait;

/// Repository port for Team aggregates.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save a new team.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, team: &Team) -> Result<(), DomainError>;

    /// Find a team by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// List every team registered for an event.
    async fn list_by_event(&self, event_id: &EventId) -> Result<Vec<Team>, DomainError>;

    /// Replace a team's judge set for a round.
    ///
    /// # Errors
    ///
    /// - `TeamNotFound` if the team doesn't exist
    async fn set_round_allocation(
        &self,
        team_id: &TeamId,
        round: Round,
        judges: BTreeSet<JudgeId>,
    ) -> Result<(), DomainError>;

    /// Apply a qualification transition to a team.
    ///
    /// Called by the projector consuming qualification events, not by the
    /// allocation engine directly.
    ///
    /// # Errors
    ///
    /// - `TeamNotFound` if the team doesn't exist
    /// - `InvalidStateTransition` if the status machine forbids the move
    async fn apply_qualification(
        &self,
        team_id: &TeamId,
        status: QualificationStatus,
    ) -> Result<(), DomainError>;
}
