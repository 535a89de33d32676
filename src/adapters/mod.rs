//! Adapters layer - concrete implementations of the ports.

pub mod events;
pub mod memory;

pub use events::{InMemoryEventBus, QualificationProjector, QUALIFICATION_EVENT_TYPES};
pub use memory::{
    InMemoryEventDirectory, InMemoryJudgeDirectory, InMemoryProgressionStore, InMemoryScoreStore,
    InMemoryTeamRepository, StaticIdentityProvider,
};
