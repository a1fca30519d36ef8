use async_trait::async_trait;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::AuthenticateCommand;
use crate::domain::credential::models::AuthorizeRequest;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::IssuedToken;
use crate::domain::credential::models::RegisterCommand;

/// Port for credential domain service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new identity with a password.
    ///
    /// # Errors
    /// * `AlreadyExists` - Identity is already registered
    /// * `StorageFailure` - Store lookup or save failed
    /// * `HashingFailure` - Password could not be hashed
    async fn register(&self, command: RegisterCommand) -> Result<(), CredentialError>;

    /// Exchange identity and password for a signed token.
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown identity or wrong password
    /// * `StorageFailure` - Store lookup failed
    /// * `SigningFailure` - Token could not be signed
    async fn authenticate(&self, command: AuthenticateCommand)
        -> Result<IssuedToken, CredentialError>;

    /// Turn a bearer header into an access decision for a resource.
    ///
    /// # Errors
    /// * `Unauthorized` - No token in the header, or the token is invalid
    async fn authorize(
        &self,
        request: AuthorizeRequest,
    ) -> Result<auth::AccessDecision, CredentialError>;
}

/// Persistence operations for credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve the credential registered for an identity.
    ///
    /// # Errors
    /// * `NotFound` - No credential for this identity
    /// * `Backend` - Storage operation failed
    async fn find_by_identity(&self, identity: &str) -> Result<Credential, StoreError>;

    /// Persist a new credential.
    ///
    /// # Errors
    /// * `AlreadyExists` - Identity is already stored
    /// * `Backend` - Storage operation failed
    async fn save(&self, credential: Credential) -> Result<(), StoreError>;
}
