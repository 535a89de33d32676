//! Team module: team aggregate, members, allocations, qualification.

mod aggregate;
mod allocation;
mod events;
mod member;
mod qualification;

pub use aggregate::Team;
pub use allocation::RoundAllocations;
pub use events::{TeamEliminated, TeamQualified};
pub use member::{joined_names, TeamMember};
pub use qualification::QualificationStatus;
