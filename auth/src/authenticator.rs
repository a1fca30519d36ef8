use crate::jwt::ClaimSet;
use crate::jwt::TokenAuthority;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::policy::AccessDecision;
use crate::policy::AccessDecisionBuilder;

/// Authentication coordinator combining password verification, token
/// handling and access decisions.
///
/// Built once at startup from immutable configuration and shared between
/// requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_authority: TokenAuthority,
    decision_builder: AccessDecisionBuilder,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Assemble an authenticator from configured components.
    pub fn from_parts(password_hasher: PasswordHasher, token_authority: TokenAuthority) -> Self {
        Self {
            password_hasher,
            token_authority,
            decision_builder: AccessDecisionBuilder::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claims` - Claims to carry in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `TokenError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &ClaimSet,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_authority.issue(claims)?;

        Ok(AuthenticationResult {
            access_token,
            expires_in: self.token_authority.ttl().num_seconds(),
        })
    }

    /// Generate a token without password verification.
    ///
    /// # Errors
    /// * `SigningFailed` - Token generation failed
    pub fn generate_token(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        self.token_authority.issue(claims)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `Invalid` - Token is malformed, forged or expired
    pub fn validate_token(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.token_authority.verify(token)
    }

    /// Build the access decision for an already verified subject.
    pub fn decide(&self, subject: &str, resource: &str) -> AccessDecision {
        self.decision_builder.build(subject, resource)
    }
}
