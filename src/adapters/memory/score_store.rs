//! In-memory score store.
//!
//! Reference implementation of the score persistence contract: the
//! write lock is the serialization point, so "first finalize wins" holds
//! under concurrent submissions and readers always see a consistent
//! snapshot.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, EventId, Round, TeamId};
use crate::domain::scoring::{Score, ScoreKey};
use crate::ports::ScoreStore;

/// In-memory score store keyed by the composite score identity.
#[derive(Default)]
pub struct InMemoryScoreStore {
    scores: RwLock<HashMap<ScoreKey, Score>>,
}

impl InMemoryScoreStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored scores (drafts included).
    pub async fn len(&self) -> usize {
        self.scores.read().await.len()
    }

    /// Returns true when nothing was submitted yet.
    pub async fn is_empty(&self) -> bool {
        self.scores.read().await.is_empty()
    }
}

fn already_finalized(key: &ScoreKey) -> DomainError {
    DomainError::new(
        ErrorCode::AlreadyFinalized,
        format!(
            "A finalized score already exists for team {} by judge {} in {}",
            key.team_id, key.judge_id, key.round
        ),
    )
    .with_detail("team_id", key.team_id.to_string())
    .with_detail("judge_id", key.judge_id.to_string())
    .with_detail("round", key.round.key())
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn find(&self, key: &ScoreKey) -> Result<Option<Score>, DomainError> {
        Ok(self.scores.read().await.get(key).cloned())
    }

    async fn save_draft(&self, score: Score) -> Result<Score, DomainError> {
        let mut scores = self.scores.write().await;
        if let Some(existing) = scores.get(score.key()) {
            if existing.is_finalized() {
                return Err(already_finalized(score.key()));
            }
        }
        scores.insert(*score.key(), score.clone());
        Ok(score)
    }

    async fn finalize(&self, score: Score) -> Result<Score, DomainError> {
        if !score.is_finalized() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "finalize called with a draft score",
            ));
        }
        let mut scores = self.scores.write().await;
        if let Some(existing) = scores.get(score.key()) {
            if existing.is_finalized() {
                return Err(already_finalized(score.key()));
            }
        }
        scores.insert(*score.key(), score.clone());
        Ok(score)
    }

    async fn list_finalized(
        &self,
        event_id: &EventId,
        round: Round,
    ) -> Result<Vec<Score>, DomainError> {
        let scores = self.scores.read().await;
        let mut out: Vec<Score> = scores
            .values()
            .filter(|s| {
                s.is_finalized() && s.key().event_id == *event_id && s.key().round == round
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            (a.key().team_id, a.key().judge_id).cmp(&(b.key().team_id, b.key().judge_id))
        });
        Ok(out)
    }

    async fn list_finalized_for_team(
        &self,
        team_id: &TeamId,
        round: Round,
    ) -> Result<Vec<Score>, DomainError> {
        let scores = self.scores.read().await;
        let mut out: Vec<Score> = scores
            .values()
            .filter(|s| {
                s.is_finalized() && s.key().team_id == *team_id && s.key().round == round
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| a.key().judge_id.cmp(&b.key().judge_id));
        Ok(out)
    }
}
