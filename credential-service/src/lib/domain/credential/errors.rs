use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for malformed or incomplete requests, raised while building commands.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Failures reported by a credential store.
///
/// An absent identity is `NotFound`, never `Backend`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Credential not found: {0}")]
    NotFound(String),

    #[error("Credential already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Top-level error for register, authenticate and authorize.
///
/// `Unauthorized` carries no detail. Unknown identity, wrong password and a
/// rejected token all map to it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("User already exists")]
    AlreadyExists,

    // Infrastructure errors
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    #[error("Token signing failed: {0}")]
    SigningFailure(String),
}

impl From<CommandError> for CredentialError {
    fn from(err: CommandError) -> Self {
        CredentialError::BadRequest(err.to_string())
    }
}

impl From<auth::ClaimError> for CredentialError {
    fn from(err: auth::ClaimError) -> Self {
        CredentialError::BadRequest(err.to_string())
    }
}
