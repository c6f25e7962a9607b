//! Signed session token verification.
//!
//! Tokens are HS256 JWTs signed by the backend with a shared secret. An
//! embedded `exp` is enforced when present; tokens without one are accepted.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use super::claims::{IssuedClaims, RawClaims, SessionClaims};
use super::TokenError;

/// Verifies (and, for local development, mints) session tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding: DecodingKey,
    encoding: EncodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_aud = false;

        Self {
            decoding: DecodingKey::from_secret(bytes),
            encoding: EncodingKey::from_secret(bytes),
            validation,
        }
    }

    /// Verify the signature and decode the claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Empty);
        }
        let data = decode::<RawClaims>(token, &self.decoding, &self.validation)?;
        SessionClaims::try_from(data.claims)
    }

    /// Mint a token for the given claims. `ttl` of `None` omits `exp`.
    pub fn issue(&self, claims: &SessionClaims, ttl: Option<Duration>) -> Result<String, TokenError> {
        let now = Utc::now();
        let payload = IssuedClaims {
            id: &claims.id,
            name: &claims.name,
            email: &claims.email,
            payment: claims.has_paid(),
            iat: now.timestamp(),
            exp: ttl.map(|ttl| (now + ttl).timestamp()),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)?)
    }
}
