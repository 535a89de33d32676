//! Score store port.
//!
//! The store is the serialization point for the one-writer-per-key rule:
//! `finalize` must be an atomic check-and-insert so the first finalize
//! for a key wins and later attempts fail without touching the stored
//! score. Reads hand out consistent snapshots; a score never becomes
//! visible to an aggregate mid-write.

use crate::domain::foundation::{DomainError, EventId, Round, TeamId};
use crate::domain::scoring::{Score, ScoreKey};
use async_trait::async_trait;

/// Persistence port for scores.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Find the score for a key (draft or finalized).
    ///
    /// Returns `None` if nothing was submitted yet.
    async fn find(&self, key: &ScoreKey) -> Result<Option<Score>, DomainError>;

    /// Save or replace the draft for this score's key.
    ///
    /// # Errors
    ///
    /// - `AlreadyFinalized` if a finalized score exists for the key
    /// - `StorageError` on persistence failure
    async fn save_draft(&self, score: Score) -> Result<Score, DomainError>;

    /// Atomically finalize the score for its key.
    ///
    /// First finalize wins: if a finalized score already exists the call
    /// fails with `AlreadyFinalized` and the stored score is unchanged.
    ///
    /// # Errors
    ///
    /// - `AlreadyFinalized` if a finalized score exists for the key
    /// - `StorageError` on persistence failure
    async fn finalize(&self, score: Score) -> Result<Score, DomainError>;

    /// Snapshot of every finalized score for an event round.
    async fn list_finalized(
        &self,
        event_id: &EventId,
        round: Round,
    ) -> Result<Vec<Score>, DomainError>;

    /// Snapshot of a team's finalized scores for a round.
    async fn list_finalized_for_team(
        &self,
        team_id: &TeamId,
        round: Round,
    ) -> Result<Vec<Score>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ScoreStore) {}
    }
}
