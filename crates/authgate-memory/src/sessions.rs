// In-memory session resolver — token → identity map behind a RwLock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use authgate_core::store::StoreResult;
use authgate_core::{Identity, SessionResolver};

/// In-memory `SessionResolver`.
///
/// Thread-safe via `tokio::sync::RwLock`; cheap to clone, all clones share
/// the same session table.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionResolver {
    sessions: Arc<RwLock<HashMap<String, Identity>>>,
}

impl MemorySessionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under an explicit token.
    pub async fn insert(&self, token: impl Into<String>, identity: Identity) {
        self.sessions.write().await.insert(token.into(), identity);
    }

    /// Register a session under a freshly generated token and return it.
    pub async fn issue(&self, identity: Identity) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.insert(token.clone(), identity).await;
        token
    }

    /// Remove a session; resolving its token afterwards yields `None`.
    pub async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionResolver for MemorySessionResolver {
    async fn resolve(&self, token: Option<&str>) -> StoreResult<Option<Identity>> {
        let Some(token) = token else {
            return Ok(None);
        };
        Ok(self.sessions.read().await.get(token).cloned())
    }
}
