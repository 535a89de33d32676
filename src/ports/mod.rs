//! Ports layer - contracts between the engine and its collaborators.

mod event_directory;
mod event_publisher;
mod identity_provider;
mod judge_directory;
mod progression_store;
mod score_store;
mod team_repository;

pub use event_directory::EventDirectory;
pub use event_publisher::{EventHandler, EventPublisher, EventSubscriber};
pub use identity_provider::IdentityProvider;
pub use judge_directory::JudgeDirectory;
pub use progression_store::ProgressionStore;
pub use score_store::ScoreStore;
pub use team_repository::TeamRepository;
