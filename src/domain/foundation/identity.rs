//! Resolved identity types for admin and judge actors.
//!
//! The engine does not issue credentials. An external login provider
//! resolves an actor id to a role (and judge type for judges) through the
//! `IdentityProvider` port; these are the domain types it populates.

use serde::{Deserialize, Serialize};

use super::{ActorId, JudgeType};

/// Role of an authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Judge,
}

/// An actor identity as resolved by the login provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The actor's unique identifier.
    pub actor_id: ActorId,

    /// Resolved role.
    pub role: Role,

    /// Judge pool membership; `None` for admins.
    pub judge_type: Option<JudgeType>,
}

impl Identity {
    /// Creates an admin identity.
    pub fn admin(actor_id: ActorId) -> Self {
        Self {
            actor_id,
            role: Role::Admin,
            judge_type: None,
        }
    }

    /// Creates a judge identity of the given type.
    pub fn judge(actor_id: ActorId, judge_type: JudgeType) -> Self {
        Self {
            actor_id,
            role: Role::Judge,
            judge_type: Some(judge_type),
        }
    }

    /// Returns true if this identity holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
