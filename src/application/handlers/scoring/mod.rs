//! Scoring handlers.

mod get_team_aggregate;
mod submit_score;

pub use get_team_aggregate::{GetTeamAggregateHandler, GetTeamAggregateQuery};
pub use submit_score::{SubmitScoreCommand, SubmitScoreHandler};
