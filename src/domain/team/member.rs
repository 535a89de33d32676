//! Team member value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// A registered member of a team.
///
/// Contact fields are optional; exports render them blank when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl TeamMember {
    /// Creates a member with just a name.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::empty_field("member_name"));
        }
        Ok(Self {
            name,
            email: None,
            phone: None,
        })
    }

    /// Adds an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds a phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Flattens a member roster into the joined string used by reports.
pub fn joined_names(members: &[TeamMember]) -> String {
    members
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
