use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::Identity;
use crate::domain::user::models::RegisterUserCommand;

/// Bearer token handed back after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_in_seconds: i64,
}

/// Port for the authentication core.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Errors
    /// * `Conflict(Username)` - Username is already taken (checked first)
    /// * `Conflict(Email)` - Email is already registered
    /// * `DirectoryUnavailable` - User store could not be reached
    async fn register(&self, command: RegisterUserCommand) -> Result<Identity, AuthError>;

    /// Check a username/password pair.
    ///
    /// # Errors
    /// * `AuthFailure` - Unknown user or wrong password
    /// * `DirectoryUnavailable` - User store could not be reached
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError>;

    /// Issue a bearer token for an authenticated identity.
    ///
    /// # Errors
    /// * `Internal` - Token could not be signed
    fn issue_token(&self, identity: &Identity) -> Result<AccessToken, AuthError>;

    /// Resolve a bearer token to the identity it currently belongs to.
    ///
    /// # Errors
    /// * `Rejected` - Token is tampered, expired, malformed or its user is gone
    /// * `DirectoryUnavailable` - User store could not be reached
    async fn authorize(&self, token: &str) -> Result<Identity, AuthError>;

    /// Authenticate and issue a token in one step.
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, AuthError> {
        let identity = self.authenticate(credentials).await?;
        self.issue_token(&identity)
    }
}
