use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Well-formed Argon2id hash with the default cost parameters. It is not the
/// hash of any known password.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$bTjdI5Ty2kWW5fzXFJP/IQ$E4V0DjH2oePCau9aYYLL6d3OubTCW/uhSfU1QeXd9Ms";

/// One-way credential hasher backed by Argon2id with default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// A fresh random salt is generated for every call, so hashing the same
    /// password twice yields two different strings.
    ///
    /// The result is a PHC string, safe to store as-is.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored PHC hash.
    ///
    /// The digest comparison is constant-time. A stored hash that cannot be
    /// parsed never matches.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Spend the cost of one verification when there is no stored hash.
    ///
    /// Always returns `false`.
    pub fn verify_absent(&self, password: &str) -> bool {
        let _ = self.verify(password, DUMMY_HASH);
        false
    }
}
