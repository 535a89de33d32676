//! Round progression module: stage machine and derived result snapshots.

mod errors;
mod events;
mod results;
mod stage;

pub use errors::ProgressionError;
pub use events::RoundCalculated;
pub use results::{
    build_round_one_results, build_round_two_results, ResultSet, RoundOneEntry,
    RoundOneResultSet, RoundTwoEntry, RoundTwoResultSet,
};
pub use stage::RoundStage;
