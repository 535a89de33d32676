//! Competition event aggregate.
//!
//! The event owns the domain list and the scoring criteria. Teams and
//! judges reference the event by id; the event configuration is treated
//! as immutable once judging begins.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CriterionId, DomainKey, EventId, Timestamp, ValidationError};

use super::Criterion;

/// A competition domain/track with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub key: DomainKey,
    pub name: String,
}

impl Domain {
    /// Creates a new domain entry.
    pub fn new(key: DomainKey, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::empty_field("domain_name"));
        }
        Ok(Self { key, name })
    }
}

/// Competition event aggregate.
///
/// # Invariants
///
/// - `scoring_criteria` is non-empty with unique criterion ids
/// - `domains` is non-empty with unique keys
/// - configuration does not change once judging begins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event.
    id: EventId,

    /// Event name.
    name: String,

    /// Date the event takes place.
    date: Timestamp,

    /// Competition domains, in configured order.
    domains: Vec<Domain>,

    /// Scoring criteria, in configured order.
    scoring_criteria: Vec<Criterion>,
}

impl Event {
    /// Create a new event.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the name is empty, domains or criteria are
    ///   empty, or ids/keys repeat
    pub fn new(
        id: EventId,
        name: impl Into<String>,
        date: Timestamp,
        domains: Vec<Domain>,
        scoring_criteria: Vec<Criterion>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::empty_field("event_name"));
        }
        if domains.is_empty() {
            return Err(ValidationError::empty_field("domains"));
        }
        if scoring_criteria.is_empty() {
            return Err(ValidationError::empty_field("scoring_criteria"));
        }
        for (i, domain) in domains.iter().enumerate() {
            if domains[..i].iter().any(|d| d.key == domain.key) {
                return Err(ValidationError::invalid_format(
                    "domains",
                    format!("duplicate domain key '{}'", domain.key),
                ));
            }
        }
        for (i, criterion) in scoring_criteria.iter().enumerate() {
            if scoring_criteria[..i].iter().any(|c| c.id() == criterion.id()) {
                return Err(ValidationError::invalid_format(
                    "scoring_criteria",
                    format!("duplicate criterion id '{}'", criterion.id()),
                ));
            }
        }

        Ok(Self {
            id,
            name,
            date,
            domains,
            scoring_criteria,
        })
    }

    /// Returns the event id.
    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// Returns the event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the event date.
    pub fn date(&self) -> &Timestamp {
        &self.date
    }

    /// Returns the competition domains in configured order.
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Returns the scoring criteria in configured order.
    pub fn scoring_criteria(&self) -> &[Criterion] {
        &self.scoring_criteria
    }

    /// Looks up a criterion by id.
    pub fn criterion(&self, id: &CriterionId) -> Option<&Criterion> {
        self.scoring_criteria.iter().find(|c| c.id() == id)
    }

    /// Looks up a domain by key.
    pub fn domain(&self, key: &DomainKey) -> Option<&Domain> {
        self.domains.iter().find(|d| &d.key == key)
    }

    /// Returns the display name for a domain key, falling back to the key.
    pub fn domain_name<'a>(&'a self, key: &'a DomainKey) -> &'a str {
        self.domain(key).map_or(key.as_str(), |d| d.name.as_str())
    }
}
