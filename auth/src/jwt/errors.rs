use std::fmt;

use thiserror::Error;

/// Error type for token operations.
///
/// The `Display` output of `Invalid` is the same for every cause; match on
/// the carried [`TokenRejection`] when the cause is needed for logging.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is invalid")]
    Invalid(TokenRejection),
}

impl TokenError {
    pub fn rejection(&self) -> Option<TokenRejection> {
        match self {
            TokenError::Invalid(rejection) => Some(*rejection),
            TokenError::SigningFailed(_) => None,
        }
    }
}

/// Why a presented token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Not three base64url segments, or a segment is not valid base64url.
    Malformed,
    /// Header is unreadable, names no algorithm, or names one other than the
    /// configured HMAC algorithm (including `none`).
    UnsupportedAlgorithm,
    SignatureMismatch,
    /// Signature is valid but the payload is not a flat string map.
    UnparseablePayload,
    MissingExpiry,
    Expired,
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            TokenRejection::Malformed => "malformed token",
            TokenRejection::UnsupportedAlgorithm => "unsupported algorithm",
            TokenRejection::SignatureMismatch => "signature mismatch",
            TokenRejection::UnparseablePayload => "unparseable payload",
            TokenRejection::MissingExpiry => "missing expiry",
            TokenRejection::Expired => "expired",
        };
        f.write_str(reason)
    }
}

/// Error for claim set construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("Claim name is reserved: {0}")]
    ReservedClaim(String),
}
