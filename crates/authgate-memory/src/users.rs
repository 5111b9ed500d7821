// In-memory user store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use authgate_core::store::StoreResult;
use authgate_core::{User, UserStore};

/// In-memory `UserStore`.
///
/// Backed by a `Vec` behind `tokio::sync::RwLock`. Emails are compared
/// case-insensitively; `User::new` already persists them lowercase.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with users.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn add_user(&self, user: User) {
        self.users.write().await.push(user);
    }

    /// Snapshot of all users (for tests).
    pub async fn snapshot(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn clear(&self) {
        self.users.write().await.clear();
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn count_users(&self) -> StoreResult<u64> {
        Ok(self.users.read().await.len() as u64)
    }
}
