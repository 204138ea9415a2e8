use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Issues bounded-lifetime bearer tokens and validates them.
///
/// Wraps a [`JwtHandler`] with the configured token lifetime. Both are fixed
/// at construction and never change afterwards.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a new issuer.
    ///
    /// # Arguments
    /// * `jwt_handler` - Codec used to sign and verify tokens
    /// * `ttl` - Lifetime of every issued token
    pub fn new(jwt_handler: JwtHandler, ttl: Duration) -> Self {
        Self { jwt_handler, ttl }
    }

    /// Lifetime of issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from now for the configured ttl.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if the current time were `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed or the expiration is out of range
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::new(subject, now, self.ttl)?;
        self.jwt_handler.encode(&claims)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `InvalidSignature`, `Expired`, `Malformed` - see [`JwtHandler::decode_at`]
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Validate a token against `now` (Unix seconds).
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        self.jwt_handler.decode_at(token, now)
    }
}
