use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::ports::CredentialStore;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_identity(&self, identity: &str) -> Result<Credential, StoreError> {
        let row: Option<(String, String)> = sqlx::query_as(
            r#"
            SELECT email, password_hash
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(identity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        match row {
            Some((email, password_hash)) => Ok(Credential {
                identity: EmailAddress::new(email)
                    .map_err(|e| StoreError::Backend(format!("Corrupt stored identity: {}", e)))?,
                secret_hash: password_hash,
            }),
            None => Err(StoreError::NotFound(identity.to_string())),
        }
    }

    async fn save(&self, credential: Credential) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (email, password_hash)
            VALUES ($1, $2)
            "#,
        )
        .bind(credential.identity.as_str())
        .bind(&credential.secret_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StoreError::AlreadyExists(credential.identity.to_string());
                }
            }
            StoreError::Backend(e.to_string())
        })?;

        Ok(())
    }
}
