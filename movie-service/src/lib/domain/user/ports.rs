use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Store of user identities, keyed by unique username and email.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Persist a new user and return it with its assigned id.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DirectoryUnavailable` - Store could not be reached
    async fn insert(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by exact (case-sensitive) username.
    ///
    /// # Errors
    /// * `DirectoryUnavailable` - Store could not be reached
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DirectoryUnavailable` - Store could not be reached
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Number of registered users.
    async fn count(&self) -> Result<i64, UserError>;
}
