//! In-memory identity provider.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{ActorId, DomainError, Identity};
use crate::ports::IdentityProvider;

/// Identity provider backed by a registered map of actors.
#[derive(Default)]
pub struct StaticIdentityProvider {
    identities: RwLock<HashMap<ActorId, Identity>>,
}

impl StaticIdentityProvider {
    /// Creates an empty provider; every lookup resolves to `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an identity.
    pub async fn register(&self, identity: Identity) {
        self.identities
            .write()
            .await
            .insert(identity.actor_id.clone(), identity);
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn resolve(&self, actor_id: &ActorId) -> Result<Option<Identity>, DomainError> {
        Ok(self.identities.read().await.get(actor_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::JudgeType;

    #[tokio::test]
    async fn resolves_registered_identities() {
        let provider = StaticIdentityProvider::new();
        let admin = ActorId::new("admin-1").unwrap();
        provider.register(Identity::admin(admin.clone())).await;
        provider
            .register(Identity::judge(
                ActorId::new("judge-1").unwrap(),
                JudgeType::Internal,
            ))
            .await;

        let resolved = provider.resolve(&admin).await.unwrap().unwrap();
        assert!(resolved.is_admin());

        let unknown = provider.resolve(&ActorId::new("ghost").unwrap()).await.unwrap();
        assert!(unknown.is_none());
    }
}
