//! Round progression store port.
//!
//! Owns the per-event stage flag and the derived result snapshots. Every
//! `commit_*` is a compare-and-swap on the stage: results and stage move
//! together or not at all, so concurrent calculations cannot both succeed
//! and no partial result set is ever visible.

use crate::domain::foundation::{DomainError, EventId};
use crate::domain::progression::{RoundOneResultSet, RoundStage, RoundTwoResultSet};
use async_trait::async_trait;

/// Persistence port for round stage and result snapshots.
#[async_trait]
pub trait ProgressionStore: Send + Sync {
    /// Current stage for an event (`Round1Open` if never advanced).
    async fn stage(&self, event_id: &EventId) -> Result<RoundStage, DomainError>;

    /// Commit the Round 1 snapshot and advance `Round1Open -> Round1Calculated`.
    ///
    /// With `force`, an event already at `Round1Calculated` may replace
    /// its snapshot in place (admin-triggered recalculation).
    ///
    /// # Errors
    ///
    /// - `AlreadyCalculated` if the stage already passed `Round1Open`
    ///   (unless forced at exactly `Round1Calculated`)
    async fn commit_round_one(
        &self,
        event_id: &EventId,
        results: RoundOneResultSet,
        force: bool,
    ) -> Result<(), DomainError>;

    /// Advance `Round1Calculated -> Round2SetupPending -> Round2SetupDone`.
    ///
    /// The pending stage is traversed inside the same critical section,
    /// so callers only ever observe setup fully done or not started.
    ///
    /// # Errors
    ///
    /// - `RoundNotReady` if Round 1 is not calculated yet
    /// - `AlreadySetup` if setup already ran
    async fn commit_round_two_setup(&self, event_id: &EventId) -> Result<(), DomainError>;

    /// Commit the Round 2 snapshot and advance `Round2SetupDone -> Round2Calculated`.
    ///
    /// # Errors
    ///
    /// - `RoundNotReady` if setup has not run
    /// - `AlreadyCalculated` if Round 2 was already calculated
    ///   (unless forced at exactly `Round2Calculated`)
    async fn commit_round_two(
        &self,
        event_id: &EventId,
        results: RoundTwoResultSet,
        force: bool,
    ) -> Result<(), DomainError>;

    /// Latest Round 1 snapshot, if calculated.
    async fn round_one_results(
        &self,
        event_id: &EventId,
    ) -> Result<Option<RoundOneResultSet>, DomainError>;

    /// Latest Round 2 snapshot, if calculated.
    async fn round_two_results(
        &self,
        event_id: &EventId,
    ) -> Result<Option<RoundTwoResultSet>, DomainError>;
}
