use std::fmt;
use std::str::FromStr;

use crate::domain::credential::errors::CommandError;
use crate::domain::credential::errors::EmailError;

/// Claim under which the authenticated identity travels in a token.
pub const IDENTITY_CLAIM: &str = "email";

/// Stored credential for one identity.
///
/// `secret_hash` is a PHC string produced by the password hasher; the
/// plaintext is never kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub identity: EmailAddress,
    pub secret_hash: String,
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new identity.
#[derive(Debug)]
pub struct RegisterCommand {
    pub identity: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    /// Validate raw registration input.
    ///
    /// # Errors
    /// * `MissingFields` - Email or password is empty
    /// * `InvalidEmail` - Email is not a valid address
    pub fn new(email: String, password: String) -> Result<Self, CommandError> {
        if email.is_empty() || password.is_empty() {
            return Err(CommandError::MissingFields);
        }
        Ok(Self {
            identity: EmailAddress::new(email)?,
            password,
        })
    }
}

/// Command to exchange credentials for a token.
///
/// The identity is kept raw: a malformed address simply cannot match a
/// stored credential, and must fail the same way as an unknown one.
#[derive(Debug)]
pub struct AuthenticateCommand {
    pub identity: String,
    pub password: String,
}

impl AuthenticateCommand {
    /// # Errors
    /// * `MissingFields` - Email or password is empty
    pub fn new(email: String, password: String) -> Result<Self, CommandError> {
        if email.is_empty() || password.is_empty() {
            return Err(CommandError::MissingFields);
        }
        Ok(Self {
            identity: email,
            password,
        })
    }
}

/// Request to authorize a bearer for a resource.
#[derive(Debug, Clone)]
pub struct AuthorizeRequest {
    pub authorization_header: String,
    pub resource: String,
}

impl AuthorizeRequest {
    pub fn new(authorization_header: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            authorization_header: authorization_header.into(),
            resource: resource.into(),
        }
    }

    /// Bearer token: the last whitespace-delimited segment of the header.
    ///
    /// Accepts both `Bearer <token>` and a bare `<token>`.
    pub fn bearer_token(&self) -> Option<&str> {
        self.authorization_header.split_whitespace().last()
    }
}

/// Token handed back after a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

impl From<auth::AuthenticationResult> for IssuedToken {
    fn from(result: auth::AuthenticationResult) -> Self {
        Self {
            access_token: result.access_token,
            expires_in: result.expires_in,
        }
    }
}
