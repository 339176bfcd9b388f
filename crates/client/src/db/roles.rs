//! Role lookups.

use tracing::instrument;

use discover_zimbabwe_core::UserId;

use crate::error::Result;
use crate::models::UserRole;
use crate::store::{Filter, RemoteStore};
use crate::table::Table;

/// Repository for role grants.
pub struct RoleRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: RemoteStore> RoleRepository<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Roles granted to a user.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn roles_for(&self, user_id: UserId) -> Result<Vec<UserRole>> {
        Table::of::<UserRole>(self.store)
            .list(Some(Filter::eq("user_id", user_id)), None)
            .await
    }

    /// Whether the user holds the `admin` role.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn is_admin(&self, user_id: UserId) -> Result<bool> {
        let roles = self.roles_for(user_id).await?;
        Ok(roles.iter().any(|grant| grant.role.is_admin()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_is_admin() {
        let store = MemoryStore::new();
        let admin = UserId::generate();
        let guide = UserId::generate();
        store
            .seed(
                "user_roles",
                [
                    json!({"user_id": admin, "role": "admin"}),
                    json!({"user_id": guide, "role": "guide"}),
                ],
            )
            .await;
        let repo = RoleRepository::new(&store);

        assert!(repo.is_admin(admin).await.unwrap());
        assert!(!repo.is_admin(guide).await.unwrap());
        assert!(!repo.is_admin(UserId::generate()).await.unwrap());
    }
}
