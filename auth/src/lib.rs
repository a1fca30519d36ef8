//! Credential and token authority
//!
//! Provides the security-sensitive core shared by the credential service:
//! - Password hashing (Argon2id, configurable cost)
//! - Signed, expiring bearer tokens (HS256 JWT) carrying a flat claim set
//! - Access decisions for verified bearers
//! - Authentication coordination
//!
//! Secrets and time sources are injected at construction; nothing here reads
//! ambient configuration.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{ClaimSet, TokenAuthority};
//! use chrono::Duration;
//!
//! let authority = TokenAuthority::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15));
//! let claims = ClaimSet::new().with_claim("email", "alice@example.com").unwrap();
//! let token = authority.issue(&claims).unwrap();
//! assert_eq!(authority.verify(&token).unwrap(), claims);
//! ```
//!
//! ## Access Decisions
//! ```
//! use auth::{AccessDecisionBuilder, Effect};
//!
//! let decision = AccessDecisionBuilder::new().build("alice@example.com", "arn:x");
//! assert_eq!(decision.effect(), Effect::Allow);
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod policy;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::ClaimError;
pub use jwt::ClaimSet;
pub use jwt::TokenAuthority;
pub use jwt::TokenError;
pub use jwt::TokenRejection;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use policy::AccessDecision;
pub use policy::AccessDecisionBuilder;
pub use policy::Effect;
