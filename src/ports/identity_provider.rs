//! Identity provider port.
//!
//! Credential issuance and login UI live outside the engine. This port
//! resolves an already-authenticated actor id to its role and judge
//! type; handlers gate admin-only transitions and judge submissions on
//! the resolved identity.

use crate::domain::foundation::{ActorId, DomainError, Identity};
use async_trait::async_trait;

/// Resolves actor ids to identities.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve an actor id.
    ///
    /// Returns `None` for unknown actors.
    async fn resolve(&self, actor_id: &ActorId) -> Result<Option<Identity>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn IdentityProvider) {}
    }
}
