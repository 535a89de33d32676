//! GetTeamAggregateHandler - Query handler for per-team score summaries.

use std::sync::Arc;

use crate::domain::foundation::{Round, TeamId};
use crate::domain::scoring::{aggregate_team, ScoringError, TeamAggregate};
use crate::ports::{ScoreStore, TeamRepository};

/// Query for a team's aggregate in one round.
#[derive(Debug, Clone)]
pub struct GetTeamAggregateQuery {
    pub team_id: TeamId,
    pub round: Round,
}

/// Handler computing team aggregates from finalized scores.
///
/// Read-only; runs concurrently with submissions and other reads over a
/// consistent score snapshot.
pub struct GetTeamAggregateHandler {
    teams: Arc<dyn TeamRepository>,
    scores: Arc<dyn ScoreStore>,
}

impl GetTeamAggregateHandler {
    pub fn new(teams: Arc<dyn TeamRepository>, scores: Arc<dyn ScoreStore>) -> Self {
        Self { teams, scores }
    }

    pub async fn handle(&self, query: GetTeamAggregateQuery) -> Result<TeamAggregate, ScoringError> {
        let team = self
            .teams
            .find_by_id(&query.team_id)
            .await?
            .ok_or(ScoringError::TeamNotFound(query.team_id))?;

        let scores = self
            .scores
            .list_finalized_for_team(&query.team_id, query.round)
            .await?;

        Ok(aggregate_team(
            query.team_id,
            query.round,
            &scores,
            team.allocated_judges().count(query.round),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryScoreStore, InMemoryTeamRepository};
    use crate::domain::event::{Criterion, Domain, Event};
    use crate::domain::foundation::{CriterionId, DomainKey, EventId, JudgeId, Timestamp};
    use crate::domain::scoring::{BonusScore, Score, ScoreKey};
    use crate::domain::team::{Team, TeamMember};
    use crate::ports::ScoreStore as _;

    fn pitch_event() -> Event {
        let ids = [
            ("problem_identification", 15.0),
            ("innovation_creativity", 15.0),
            ("feasibility_practicality", 20.0),
            ("market_impact_potential", 20.0),
            ("technology_domain_relevance", 15.0),
            ("pitch_delivery_qa", 15.0),
        ];
        Event::new(
            EventId::new(),
            "Pitch Finals",
            Timestamp::now(),
            vec![Domain::new(DomainKey::new("fintech").unwrap(), "Fintech").unwrap()],
            ids.iter()
                .map(|(id, max)| {
                    Criterion::new(CriterionId::new(*id).unwrap(), id.to_uppercase(), *max).unwrap()
                })
                .collect(),
        )
        .unwrap()
    }

    fn score(event: &Event, team_id: TeamId, judge_id: JudgeId, points: [f64; 6], bonus: f64) -> Score {
        let ids = [
            "problem_identification",
            "innovation_creativity",
            "feasibility_practicality",
            "market_impact_potential",
            "technology_domain_relevance",
            "pitch_delivery_qa",
        ];
        Score::finalized(
            ScoreKey {
                event_id: *event.id(),
                team_id,
                judge_id,
                round: Round::Round1,
            },
            event,
            ids.iter()
                .zip(points)
                .map(|(id, v)| (CriterionId::new(*id).unwrap(), v))
                .collect(),
            BonusScore::try_from_points(bonus).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn aggregates_two_internal_judges() {
        let teams = Arc::new(InMemoryTeamRepository::new());
        let scores = Arc::new(InMemoryScoreStore::new());
        let event = pitch_event();

        let j1 = JudgeId::new();
        let j2 = JudgeId::new();
        let mut team = Team::new(
            TeamId::new(),
            *event.id(),
            DomainKey::new("fintech").unwrap(),
            "T1",
            "A problem worth solving",
            vec![TeamMember::new("Member").unwrap()],
        )
        .unwrap();
        team.set_round_allocation(Round::Round1, [j1, j2].into());
        teams.save(&team).await.unwrap();

        // Judge A: full marks + max bonus = 105.0, Judge B: 70.0.
        scores
            .finalize(score(&event, *team.id(), j1, [15.0, 15.0, 20.0, 20.0, 15.0, 15.0], 5.0))
            .await
            .unwrap();
        scores
            .finalize(score(&event, *team.id(), j2, [10.0, 10.0, 15.0, 15.0, 10.0, 10.0], 0.0))
            .await
            .unwrap();

        let handler = GetTeamAggregateHandler::new(teams, scores);
        let agg = handler
            .handle(GetTeamAggregateQuery {
                team_id: *team.id(),
                round: Round::Round1,
            })
            .await
            .unwrap();

        assert_eq!(agg.average_score, 87.5);
        assert_eq!(agg.scores_received, 2);
        assert_eq!(agg.total_judges, 2);
        assert_eq!(agg.per_judge.len(), 2);
    }

    #[tokio::test]
    async fn unknown_team_is_rejected() {
        let handler = GetTeamAggregateHandler::new(
            Arc::new(InMemoryTeamRepository::new()),
            Arc::new(InMemoryScoreStore::new()),
        );
        let result = handler
            .handle(GetTeamAggregateQuery {
                team_id: TeamId::new(),
                round: Round::Round1,
            })
            .await;
        assert!(matches!(result, Err(ScoringError::TeamNotFound(_))));
    }
}
