//! Competition event module: event configuration and scoring criteria.

mod aggregate;
mod criterion;

pub use aggregate::{Domain, Event};
pub use criterion::Criterion;
