//! In-memory team repository.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, EventId, JudgeId, Round, TeamId};
use crate::domain::team::{QualificationStatus, Team};
use crate::ports::TeamRepository;

/// In-memory team repository.
#[derive(Default)]
pub struct InMemoryTeamRepository {
    teams: RwLock<HashMap<TeamId, Team>>,
}

impl InMemoryTeamRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &TeamId) -> DomainError {
    DomainError::new(ErrorCode::TeamNotFound, format!("Team not found: {}", id))
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn save(&self, team: &Team) -> Result<(), DomainError> {
        self.teams.write().await.insert(*team.id(), team.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        Ok(self.teams.read().await.get(id).cloned())
    }

    async fn list_by_event(&self, event_id: &EventId) -> Result<Vec<Team>, DomainError> {
        let teams = self.teams.read().await;
        let mut out: Vec<Team> = teams
            .values()
            .filter(|t| t.event_id() == event_id)
            .cloned()
            .collect();
        out.sort_by_key(|t| *t.id());
        Ok(out)
    }

    async fn set_round_allocation(
        &self,
        team_id: &TeamId,
        round: Round,
        judges: BTreeSet<JudgeId>,
    ) -> Result<(), DomainError> {
        let mut teams = self.teams.write().await;
        let team = teams.get_mut(team_id).ok_or_else(|| not_found(team_id))?;
        team.set_round_allocation(round, judges);
        Ok(())
    }

    async fn apply_qualification(
        &self,
        team_id: &TeamId,
        status: QualificationStatus,
    ) -> Result<(), DomainError> {
        let mut teams = self.teams.write().await;
        let team = teams.get_mut(team_id).ok_or_else(|| not_found(team_id))?;
        team.apply_qualification(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DomainKey;
    use crate::domain::team::TeamMember;

    fn team(event_id: EventId, name: &str) -> Team {
        Team::new(
            TeamId::new(),
            event_id,
            DomainKey::new("fintech").unwrap(),
            name,
            "A problem worth solving",
            vec![TeamMember::new("Member").unwrap()],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_and_find_round_trip() {
        let repo = InMemoryTeamRepository::new();
        let t = team(EventId::new(), "Ledger Lions");
        repo.save(&t).await.unwrap();

        let found = repo.find_by_id(t.id()).await.unwrap().unwrap();
        assert_eq!(found.team_name(), "Ledger Lions");
    }

    #[tokio::test]
    async fn list_by_event_filters_other_events() {
        let repo = InMemoryTeamRepository::new();
        let event_id = EventId::new();
        repo.save(&team(event_id, "A")).await.unwrap();
        repo.save(&team(event_id, "B")).await.unwrap();
        repo.save(&team(EventId::new(), "Other")).await.unwrap();

        let listed = repo.list_by_event(&event_id).await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn set_round_allocation_persists() {
        let repo = InMemoryTeamRepository::new();
        let t = team(EventId::new(), "Ledger Lions");
        repo.save(&t).await.unwrap();

        let judge = JudgeId::new();
        repo.set_round_allocation(t.id(), Round::Round2, [judge].into())
            .await
            .unwrap();

        let found = repo.find_by_id(t.id()).await.unwrap().unwrap();
        assert!(found.is_allocated(Round::Round2, &judge));
    }

    #[tokio::test]
    async fn allocation_for_unknown_team_fails() {
        let repo = InMemoryTeamRepository::new();
        let result = repo
            .set_round_allocation(&TeamId::new(), Round::Round2, BTreeSet::new())
            .await;
        assert_eq!(result.unwrap_err().code, ErrorCode::TeamNotFound);
    }

    #[tokio::test]
    async fn apply_qualification_enforces_the_state_machine() {
        let repo = InMemoryTeamRepository::new();
        let t = team(EventId::new(), "Ledger Lions");
        repo.save(&t).await.unwrap();

        repo.apply_qualification(t.id(), QualificationStatus::Eliminated)
            .await
            .unwrap();
        let result = repo
            .apply_qualification(t.id(), QualificationStatus::Winner)
            .await;
        assert_eq!(result.unwrap_err().code, ErrorCode::InvalidStateTransition);
    }
}
