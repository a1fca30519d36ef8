use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    /// The hash could not be produced (bad cost parameters, RNG failure).
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash is not a readable PHC string.
    #[error("Stored password hash is unreadable: {0}")]
    VerificationFailed(String),
}
