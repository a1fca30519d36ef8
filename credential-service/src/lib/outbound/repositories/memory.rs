use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::ports::CredentialStore;

/// Process-local credential store.
///
/// Used when no database is configured and by the HTTP tests. Contents are
/// lost on restart.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_identity(&self, identity: &str) -> Result<Credential, StoreError> {
        self.credentials
            .read()
            .await
            .get(identity)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(identity.to_string()))
    }

    async fn save(&self, credential: Credential) -> Result<(), StoreError> {
        let mut credentials = self.credentials.write().await;
        let identity = credential.identity.as_str().to_string();

        if credentials.contains_key(&identity) {
            return Err(StoreError::AlreadyExists(identity));
        }
        credentials.insert(identity, credential);

        Ok(())
    }
}
