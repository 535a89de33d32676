//! Result listing handlers.

mod list_results;

pub use list_results::{ListResultsHandler, ListResultsQuery, RoundResults};
