use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessDecision;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::ClaimSet;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::AuthenticateCommand;
use crate::domain::credential::models::AuthorizeRequest;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::IssuedToken;
use crate::domain::credential::models::RegisterCommand;
use crate::domain::credential::models::IDENTITY_CLAIM;
use crate::domain::credential::ports::CredentialServicePort;
use crate::domain::credential::ports::CredentialStore;

/// Domain service implementation for credential operations.
///
/// Every request is a single pass over the store and the authenticator; no
/// step is retried.
pub struct CredentialService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> CredentialService<CS>
where
    CS: CredentialStore,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Configured hashing, token and decision core
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> CredentialServicePort for CredentialService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<(), CredentialError> {
        match self.store.find_by_identity(command.identity.as_str()).await {
            Ok(_) => return Err(CredentialError::AlreadyExists),
            Err(StoreError::NotFound(_)) => {}
            Err(e) => {
                tracing::error!(error = %e, "Credential lookup failed during registration");
                return Err(CredentialError::StorageFailure(e.to_string()));
            }
        }

        let secret_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| CredentialError::HashingFailure(e.to_string()))?;

        let identity = command.identity;
        self.store
            .save(Credential {
                identity: identity.clone(),
                secret_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists(_) => CredentialError::AlreadyExists,
                other => {
                    tracing::error!(error = %other, "Failed to save credential");
                    CredentialError::StorageFailure(other.to_string())
                }
            })?;

        tracing::info!(identity = %identity, "Credential registered");
        Ok(())
    }

    async fn authenticate(
        &self,
        command: AuthenticateCommand,
    ) -> Result<IssuedToken, CredentialError> {
        if EmailAddress::new(command.identity.clone()).is_err() {
            tracing::warn!(reason = "invalid identity format", "Authentication rejected");
            return Err(CredentialError::Unauthorized);
        }

        let credential = self
            .store
            .find_by_identity(&command.identity)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => {
                    tracing::warn!(reason = "unknown identity", "Authentication rejected");
                    CredentialError::Unauthorized
                }
                other => {
                    tracing::error!(error = %other, "Credential lookup failed during authentication");
                    CredentialError::StorageFailure(other.to_string())
                }
            })?;

        let claims = ClaimSet::new().with_claim(IDENTITY_CLAIM, credential.identity.as_str())?;

        let result = self
            .authenticator
            .authenticate(&command.password, &credential.secret_hash, &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(reason = "password mismatch", "Authentication rejected");
                    CredentialError::Unauthorized
                }
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(error = %err, "Stored credential could not be verified");
                    CredentialError::Unauthorized
                }
                AuthenticationError::TokenError(err) => {
                    tracing::error!(error = %err, "Token generation failed");
                    CredentialError::SigningFailure(err.to_string())
                }
            })?;

        Ok(result.into())
    }

    async fn authorize(&self, request: AuthorizeRequest) -> Result<AccessDecision, CredentialError> {
        let token = request.bearer_token().ok_or_else(|| {
            tracing::warn!(reason = "no bearer token", "Authorization rejected");
            CredentialError::Unauthorized
        })?;

        let claims = self.authenticator.validate_token(token).map_err(|e| {
            let reason = e
                .rejection()
                .map(|rejection| rejection.to_string())
                .unwrap_or_else(|| e.to_string());
            tracing::warn!(reason = %reason, "Authorization rejected");
            CredentialError::Unauthorized
        })?;

        let subject = claims.get(IDENTITY_CLAIM).unwrap_or_else(|| {
            tracing::warn!("Verified token carries no identity claim");
            ""
        });

        Ok(self.authenticator.decide(subject, &request.resource))
    }
}
