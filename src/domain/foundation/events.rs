//! Event infrastructure for domain event publishing.
//!
//! Status changes that matter outside the engine (a team qualifying for
//! Round 2, a score being finalized, a round calculation completing) are
//! emitted as explicit domain events rather than buried field writes, so
//! the collaborator that persists records can consume an auditable stream.
//!
//! - `DomainEventId` - unique identifier for event instances (deduplication)
//! - `EventMetadata` - correlation context
//! - `EventEnvelope` - transport wrapper for domain events
//! - `DomainEvent` - trait all domain events implement
//! - `domain_event!` - macro to implement the trait with minimal boilerplate

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Trait that all domain events must implement.
///
/// Event type strings carry a version suffix (e.g. "team.qualified.v1")
/// for routing and explicit versioning. Use the `domain_event!` macro to
/// implement this trait.
pub trait DomainEvent: Send + Sync {
    /// Returns the event type string (e.g. "team.qualified.v1").
    fn event_type(&self) -> &'static str;

    /// Returns the ID of the aggregate that emitted this event.
    fn aggregate_id(&self) -> String;

    /// Returns the type of aggregate (e.g. "Team", "Score").
    fn aggregate_type(&self) -> &'static str;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> Timestamp;

    /// Returns the unique ID for this event instance.
    fn event_id(&self) -> DomainEventId;
}

/// Extension trait that provides `to_envelope()` for serializable events.
///
/// Blanket-implemented for any `DomainEvent + Serialize`, so event
/// authors never write envelope-construction code.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    /// Converts this domain event into an `EventEnvelope` for transport.
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope {
            event_id: self.event_id(),
            event_type: self.event_type().to_string(),
            aggregate_id: self.aggregate_id(),
            aggregate_type: self.aggregate_type().to_string(),
            occurred_at: self.occurred_at(),
            payload: serde_json::to_value(self)
                .expect("Event serialization should never fail for well-formed events"),
            metadata: EventMetadata::default(),
        }
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Macro to implement DomainEvent with minimal boilerplate.
///
/// # Example
///
/// ```ignore
/// domain_event!(
///     TeamQualified,
///     event_type = "team.qualified.v1",
///     aggregate_id = team_id,
///     aggregate_type = "Team",
///     occurred_at = occurred_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident,
        event_type = $event_type:expr,
        aggregate_id = $agg_id_field:ident,
        aggregate_type = $agg_type:expr,
        occurred_at = $occurred_field:ident,
        event_id = $event_id_field:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                $agg_type
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn event_id(&self) -> $crate::domain::foundation::DomainEventId {
                self.$event_id_field.clone()
            }
        }
    };
}

pub use domain_event;

/// Unique identifier for event instances (used for deduplication).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainEventId(String);

impl DomainEventId {
    /// Creates a new random DomainEventId using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a DomainEventId from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DomainEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DomainEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation context attached to every envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Correlation id linking this event to the originating command.
    pub correlation_id: Option<String>,

    /// The actor whose command produced this event.
    pub actor_id: Option<String>,
}

/// Transport wrapper for domain events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique id of this event instance.
    pub event_id: DomainEventId,

    /// Versioned event type string for routing (e.g. "team.qualified.v1").
    pub event_type: String,

    /// Id of the emitting aggregate.
    pub aggregate_id: String,

    /// Type of the emitting aggregate.
    pub aggregate_type: String,

    /// When the event occurred.
    pub occurred_at: Timestamp,

    /// Serialized event body.
    pub payload: JsonValue,

    /// Correlation context.
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Attaches a correlation id.
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.metadata.correlation_id = Some(correlation_id.into());
        self
    }

    /// Attaches the acting identity.
    pub fn with_actor_id(mut self, actor_id: impl Into<String>) -> Self {
        self.metadata.actor_id = Some(actor_id.into());
        self
    }
}
