//! Event bus adapters and projectors.

mod in_memory;
mod qualification_projector;

pub use in_memory::InMemoryEventBus;
pub use qualification_projector::{QualificationProjector, QUALIFICATION_EVENT_TYPES};
