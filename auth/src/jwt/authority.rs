use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::ClaimSet;
use super::claims::TokenPayload;
use super::errors::TokenError;
use super::errors::TokenRejection;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Issues and verifies signed, expiring bearer tokens.
///
/// Tokens are compact JWTs signed with HS256 (HMAC with SHA-256). The secret,
/// the time-to-live and the clock are fixed at construction.
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenAuthority {
    /// Create a token authority reading time from the wall clock.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `ttl` - Lifetime of every issued token
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self::with_clock(secret, ttl, Arc::new(SystemClock))
    }

    /// Create a token authority with an injected time source.
    pub fn with_clock(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token carrying `claims` that expires `ttl` from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Expiry out of range, or serialization or the MAC
    ///   primitive failed
    pub fn issue(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::SigningFailed("Token expiry out of range".to_string()))?;
        let payload = TokenPayload::new(claims, expires_at.timestamp());

        encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return the claims it was issued with.
    ///
    /// The header algorithm is pinned to the configured one and the signature
    /// is checked before any payload field is read. Expiry is then checked
    /// against the injected clock.
    ///
    /// # Errors
    /// * `Invalid` - See [`TokenRejection`] for the individual causes
    pub fn verify(&self, token: &str) -> Result<ClaimSet, TokenError> {
        let header = decode_header(token).map_err(|e| match e.kind() {
            ErrorKind::Json(_) => TokenError::Invalid(TokenRejection::UnsupportedAlgorithm),
            _ => TokenError::Invalid(TokenRejection::Malformed),
        })?;
        if header.alg != self.algorithm {
            return Err(TokenError::Invalid(TokenRejection::UnsupportedAlgorithm));
        }

        let token_data = decode::<TokenPayload>(token, &self.decoding_key, &self.validation())
            .map_err(|e| TokenError::Invalid(rejection_for(e.kind())))?;
        let payload = token_data.claims;

        if payload.exp.is_none() {
            return Err(TokenError::Invalid(TokenRejection::MissingExpiry));
        }
        if payload.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::Invalid(TokenRejection::Expired));
        }

        Ok(payload.into_claims())
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Registered claims are checked here, against the injected clock.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation
    }
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn rejection_for(kind: &ErrorKind) -> TokenRejection {
    match kind {
        ErrorKind::InvalidSignature => TokenRejection::SignatureMismatch,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenRejection::UnsupportedAlgorithm
        }
        ErrorKind::Json(_) | ErrorKind::Utf8(_) => TokenRejection::UnparseablePayload,
        _ => TokenRejection::Malformed,
    }
}
