//! In-memory progression store.
//!
//! Stage flag and result snapshots live under one lock, so every commit
//! is a compare-and-swap: losing racers observe a typed conflict and no
//! partial snapshot is ever readable.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, EventId, StateMachine};
use crate::domain::progression::{RoundOneResultSet, RoundStage, RoundTwoResultSet};
use crate::ports::ProgressionStore;

#[derive(Default)]
struct EventProgress {
    stage: RoundStage,
    round_one: Option<RoundOneResultSet>,
    round_two: Option<RoundTwoResultSet>,
}

/// In-memory stage and snapshot store.
#[derive(Default)]
pub struct InMemoryProgressionStore {
    events: RwLock<HashMap<EventId, EventProgress>>,
}

impl InMemoryProgressionStore {
    /// Creates an empty store; unknown events report `Round1Open`.
    pub fn new() -> Self {
        Self::default()
    }
}

fn advance(progress: &mut EventProgress, target: RoundStage) -> Result<(), DomainError> {
    progress.stage = progress
        .stage
        .transition_to(target)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
    Ok(())
}

#[async_trait]
impl ProgressionStore for InMemoryProgressionStore {
    async fn stage(&self, event_id: &EventId) -> Result<RoundStage, DomainError> {
        let events = self.events.read().await;
        Ok(events.get(event_id).map_or(RoundStage::Round1Open, |p| p.stage))
    }

    async fn commit_round_one(
        &self,
        event_id: &EventId,
        results: RoundOneResultSet,
        force: bool,
    ) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        let progress = events.entry(*event_id).or_default();
        match progress.stage {
            RoundStage::Round1Open => {
                advance(progress, RoundStage::Round1Calculated)?;
                progress.round_one = Some(results);
                Ok(())
            }
            RoundStage::Round1Calculated if force => {
                progress.round_one = Some(results);
                Ok(())
            }
            _ => Err(DomainError::new(
                ErrorCode::AlreadyCalculated,
                "Round 1 results have already been calculated",
            )
            .with_detail("round", "round1")),
        }
    }

    async fn commit_round_two_setup(&self, event_id: &EventId) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        let progress = events.entry(*event_id).or_default();
        match progress.stage {
            RoundStage::Round1Open => Err(DomainError::new(
                ErrorCode::RoundNotReady,
                "Round 1 must be calculated before Round 2 setup",
            )),
            RoundStage::Round1Calculated => {
                // Pending is traversed inside the same critical section;
                // callers never observe a half-finished setup.
                advance(progress, RoundStage::Round2SetupPending)?;
                advance(progress, RoundStage::Round2SetupDone)?;
                Ok(())
            }
            _ => Err(DomainError::new(
                ErrorCode::AlreadySetup,
                "Round 2 has already been set up",
            )),
        }
    }

    async fn commit_round_two(
        &self,
        event_id: &EventId,
        results: RoundTwoResultSet,
        force: bool,
    ) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        let progress = events.entry(*event_id).or_default();
        match progress.stage {
            RoundStage::Round2SetupDone => {
                advance(progress, RoundStage::Round2Calculated)?;
                progress.round_two = Some(results);
                Ok(())
            }
            RoundStage::Round2Calculated if force => {
                progress.round_two = Some(results);
                Ok(())
            }
            RoundStage::Round2Calculated => Err(DomainError::new(
                ErrorCode::AlreadyCalculated,
                "Round 2 results have already been calculated",
            )
            .with_detail("round", "round2")),
            _ => Err(DomainError::new(
                ErrorCode::RoundNotReady,
                "Round 2 must be set up before calculation",
            )),
        }
    }

    async fn round_one_results(
        &self,
        event_id: &EventId,
    ) -> Result<Option<RoundOneResultSet>, DomainError> {
        let events = self.events.read().await;
        Ok(events.get(event_id).and_then(|p| p.round_one.clone()))
    }

    async fn round_two_results(
        &self,
        event_id: &EventId,
    ) -> Result<Option<RoundTwoResultSet>, DomainError> {
        let events = self.events.read().await;
        Ok(events.get(event_id).and_then(|p| p.round_two.clone()))
    }
}
