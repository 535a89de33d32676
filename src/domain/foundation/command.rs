//! Command infrastructure for application handlers.
//!
//! Instead of each handler accepting `correlation_id: Option<String>,
//! actor_id: ActorId, ...` separately, they accept a single
//! `CommandMetadata` struct that flows through command processing and
//! into emitted events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ActorId;

/// Metadata context for command handlers.
///
/// Carries the acting identity and correlation context through the
/// command pipeline and onto emitted events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The actor issuing the command (admin or judge login id).
    pub actor_id: ActorId,

    /// Correlation id linking related commands and events.
    /// Generated if the caller does not supply one.
    pub correlation_id: String,
}

impl CommandMetadata {
    /// Creates metadata for the given actor with a fresh correlation id.
    pub fn new(actor_id: ActorId) -> Self {
        Self {
            actor_id,
            correlation_id: Uuid::new_v4().to_string(),
        }
    }

    /// Overrides the correlation id (e.g. propagated from a caller).
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }

    /// Returns the correlation id.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }
}
