use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claims carried by every bearer token.
///
/// The subject is the username the token was issued to. Timestamps are Unix
/// seconds, as in RFC 7519.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for `subject` issued at `issued_at` and valid for `ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - The expiration falls outside the representable range
    pub fn new(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!(
                "expiration overflows for a ttl of {} seconds",
                ttl.num_seconds()
            ))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Subject the token was issued to.
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is still valid during the second named by `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}
