//! ListResultsHandler - read access to committed round results.

use std::sync::Arc;

use crate::domain::foundation::{DomainKey, EventId, Round};
use crate::domain::progression::{ProgressionError, RoundOneEntry, RoundTwoEntry};
use crate::ports::ProgressionStore;

/// Query for committed results, optionally narrowed to one domain.
#[derive(Debug, Clone)]
pub struct ListResultsQuery {
    pub event_id: EventId,
    pub round: Round,
    pub domain: Option<DomainKey>,
}

/// Committed entries for one round.
///
/// Round 1 entries rank within their domain; Round 2 entries rank across
/// the whole cohort, so the two carry different rank semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundResults {
    RoundOne(Vec<RoundOneEntry>),
    RoundTwo(Vec<RoundTwoEntry>),
}

impl RoundResults {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        match self {
            RoundResults::RoundOne(entries) => entries.len(),
            RoundResults::RoundTwo(entries) => entries.len(),
        }
    }

    /// Returns true when no entries were committed (or none match).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handler listing committed result entries.
///
/// Uncalculated rounds list as empty rather than erroring, matching how
/// result dashboards poll before calculation.
pub struct ListResultsHandler {
    progression: Arc<dyn ProgressionStore>,
}

impl ListResultsHandler {
    pub fn new(progression: Arc<dyn ProgressionStore>) -> Self {
        Self { progression }
    }

    pub async fn handle(&self, query: ListResultsQuery) -> Result<RoundResults, ProgressionError> {
        match query.round {
            Round::Round1 => {
                let entries = self
                    .progression
                    .round_one_results(&query.event_id)
                    .await?
                    .map(|set| set.entries)
                    .unwrap_or_default();
                let filtered = match &query.domain {
                    Some(domain) => entries.into_iter().filter(|e| &e.domain == domain).collect(),
                    None => entries,
                };
                Ok(RoundResults::RoundOne(filtered))
            }
            Round::Round2 => {
                let entries = self
                    .progression
                    .round_two_results(&query.event_id)
                    .await?
                    .map(|set| set.entries)
                    .unwrap_or_default();
                let filtered = match &query.domain {
                    Some(domain) => entries.into_iter().filter(|e| &e.domain == domain).collect(),
                    None => entries,
                };
                Ok(RoundResults::RoundTwo(filtered))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryProgressionStore;
    use crate::domain::foundation::{TeamId, Timestamp};
    use crate::domain::progression::ResultSet;

    fn entry(domain: &str, rank: u32) -> RoundOneEntry {
        RoundOneEntry {
            team_id: TeamId::new(),
            domain: DomainKey::new(domain).unwrap(),
            total_score: 100.0,
            average_score: 50.0,
            judge_count: 2,
            rank,
        }
    }

    #[tokio::test]
    async fn uncalculated_round_lists_empty() {
        let handler = ListResultsHandler::new(Arc::new(InMemoryProgressionStore::new()));
        let results = handler
            .handle(ListResultsQuery {
                event_id: EventId::new(),
                round: Round::Round1,
                domain: None,
            })
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn domain_filter_narrows_round_one_entries() {
        let store = Arc::new(InMemoryProgressionStore::new());
        let event_id = EventId::new();
        store
            .commit_round_one(
                &event_id,
                ResultSet {
                    round: Round::Round1,
                    computed_at: Timestamp::now(),
                    entries: vec![entry("fintech", 1), entry("fintech", 2), entry("health", 1)],
                },
                false,
            )
            .await
            .unwrap();

        let handler = ListResultsHandler::new(store);
        let all = handler
            .handle(ListResultsQuery {
                event_id,
                round: Round::Round1,
                domain: None,
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let fintech = handler
            .handle(ListResultsQuery {
                event_id,
                round: Round::Round1,
                domain: Some(DomainKey::new("fintech").unwrap()),
            })
            .await
            .unwrap();
        assert_eq!(fintech.len(), 2);
    }
}
