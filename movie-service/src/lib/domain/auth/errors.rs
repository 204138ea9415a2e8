use std::fmt;

use thiserror::Error;

use crate::user::errors::UserError;

/// Field that collided with an existing user at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Username,
    Email,
}

impl fmt::Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictField::Username => f.write_str("username"),
            ConflictField::Email => f.write_str("email"),
        }
    }
}

/// Why a bearer token was turned away.
///
/// Kept for logs only; every reason maps to the same external response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    InvalidSignature,
    Expired,
    Malformed(String),
    MissingToken,
    UnknownSubject(String),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::InvalidSignature => f.write_str("invalid signature"),
            RejectionReason::Expired => f.write_str("expired"),
            RejectionReason::Malformed(detail) => write!(f, "malformed: {}", detail),
            RejectionReason::MissingToken => f.write_str("missing bearer token"),
            RejectionReason::UnknownSubject(subject) => {
                write!(f, "subject {} no longer exists", subject)
            }
        }
    }
}

impl From<auth::JwtError> for RejectionReason {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::InvalidSignature => RejectionReason::InvalidSignature,
            auth::JwtError::Expired => RejectionReason::Expired,
            other => RejectionReason::Malformed(other.to_string()),
        }
    }
}

/// Failures of the authentication core.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown username or wrong password; the two are indistinguishable.
    #[error("Invalid credentials")]
    AuthFailure,

    #[error("The {0} is already registered")]
    Conflict(ConflictField),

    #[error("Token rejected: {0}")]
    Rejected(RejectionReason),

    #[error("User directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(_) => AuthError::Conflict(ConflictField::Username),
            UserError::EmailAlreadyExists(_) => AuthError::Conflict(ConflictField::Email),
            UserError::DirectoryUnavailable(msg) => AuthError::DirectoryUnavailable(msg),
            // Stored rows that no longer pass validation
            UserError::InvalidUsername(_) | UserError::InvalidEmail(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}
