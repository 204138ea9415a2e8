use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::ConflictField;
use crate::domain::auth::errors::RejectionReason;
use crate::domain::auth::ports::AccessToken;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::Identity;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserDirectory;

/// Domain service implementation for registration, login and token checks.
///
/// Holds no mutable state; the issuer's secret and ttl are fixed at
/// construction.
pub struct AuthService<UD>
where
    UD: UserDirectory,
{
    directory: Arc<UD>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

impl<UD> AuthService<UD>
where
    UD: UserDirectory,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - User store implementation
    /// * `token_issuer` - Configured token issuer
    pub fn new(directory: Arc<UD>, token_issuer: TokenIssuer) -> Self {
        Self {
            directory,
            password_hasher: PasswordHasher::new(),
            token_issuer,
        }
    }

    /// Hash on the blocking pool.
    async fn hash_password(&self, password: &Password) -> Result<String, AuthError> {
        let hasher = self.password_hasher;
        let password = password.clone();

        tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Verify on the blocking pool. A missing user still costs one full
    /// verification.
    async fn verify_password(
        &self,
        password: &Password,
        stored_hash: Option<String>,
    ) -> Result<bool, AuthError> {
        let hasher = self.password_hasher;
        let password = password.clone();

        tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => hasher.verify(password.expose(), &hash),
            None => hasher.verify_absent(password.expose()),
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))
    }

    /// Resolve a token against an explicit clock (Unix seconds).
    pub async fn authorize_at(&self, token: &str, now: i64) -> Result<Identity, AuthError> {
        let claims = self
            .token_issuer
            .validate_at(token, now)
            .map_err(|e| AuthError::Rejected(e.into()))?;

        let unknown_subject =
            || AuthError::Rejected(RejectionReason::UnknownSubject(claims.sub.clone()));

        // Always checked against the directory as it is now
        let username = Username::new(claims.sub.clone()).map_err(|_| unknown_subject())?;

        self.directory
            .find_by_username(&username)
            .await?
            .map(Identity::from)
            .ok_or_else(unknown_subject)
    }
}

#[async_trait]
impl<UD> AuthServicePort for AuthService<UD>
where
    UD: UserDirectory,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<Identity, AuthError> {
        if self
            .directory
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AuthError::Conflict(ConflictField::Username));
        }

        if self
            .directory
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AuthError::Conflict(ConflictField::Email));
        }

        let password_hash = self.hash_password(&command.password).await?;

        let user = self
            .directory
            .insert(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(Identity::from(user))
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let user = match Username::new(credentials.username.clone()) {
            Ok(username) => self.directory.find_by_username(&username).await?,
            Err(_) => None,
        };

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let verified = self
            .verify_password(&credentials.password, stored_hash)
            .await?;

        match user {
            Some(user) if verified => Ok(Identity::from(user)),
            _ => Err(AuthError::AuthFailure),
        }
    }

    fn issue_token(&self, identity: &Identity) -> Result<AccessToken, AuthError> {
        let token = self
            .token_issuer
            .issue(identity.username.as_str())
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AccessToken {
            token,
            expires_in_seconds: self.token_issuer.ttl().num_seconds(),
        })
    }

    async fn authorize(&self, token: &str) -> Result<Identity, AuthError> {
        self.authorize_at(token, Utc::now().timestamp()).await
    }
}

#[cfg(test)]
mod tests {
    use auth::Claims;
    use auth::JwtHandler;
    use chrono::Duration;
    use jsonwebtoken::Algorithm;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::user::errors::UserError;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestUserDirectory {}

        #[async_trait]
        impl UserDirectory for TestUserDirectory {
            async fn insert(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn count(&self) -> Result<i64, UserError>;
        }
    }

    fn jwt_handler() -> JwtHandler {
        JwtHandler::new(SECRET, Algorithm::HS256).expect("HS256 is supported")
    }

    fn service(directory: MockTestUserDirectory) -> AuthService<MockTestUserDirectory> {
        AuthService::new(
            Arc::new(directory),
            TokenIssuer::new(jwt_handler(), Duration::minutes(30)),
        )
    }

    fn alice(password_hash: String) -> User {
        User {
            id: UserId(1),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
            password_hash,
        }
    }

    fn register_alice() -> RegisterUserCommand {
        RegisterUserCommand::new(
            Username::new("alice".to_string()).unwrap(),
            EmailAddress::new("alice@x.com".to_string()).unwrap(),
            Password::new("secret1".to_string()).unwrap(),
        )
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: Password::unchecked(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        directory
            .expect_insert()
            .withf(|user| {
                user.username.as_str() == "alice"
                    && user.email.as_str() == "alice@x.com"
                    && user.password_hash.starts_with("$argon2")
                    && PasswordHasher::new().verify("secret1", &user.password_hash)
            })
            .times(1)
            .returning(|user| {
                Ok(User {
                    id: UserId(1),
                    username: user.username,
                    email: user.email,
                    password_hash: user.password_hash,
                })
            });

        let identity = service(directory)
            .register(register_alice())
            .await
            .expect("Registration failed");

        assert_eq!(identity.id, UserId(1));
        assert_eq!(identity.username.as_str(), "alice");
        assert_eq!(identity.email.as_str(), "alice@x.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_username_checked_first() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(alice("$argon2id$hash".to_string()))));
        directory.expect_find_by_email().times(0);
        directory.expect_insert().times(0);

        let result = service(directory).register(register_alice()).await;
        assert!(matches!(
            result,
            Err(AuthError::Conflict(ConflictField::Username))
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(alice("$argon2id$hash".to_string()))));
        directory.expect_insert().times(0);

        let result = service(directory).register(register_alice()).await;
        assert!(matches!(
            result,
            Err(AuthError::Conflict(ConflictField::Email))
        ));
    }

    #[tokio::test]
    async fn test_register_late_uniqueness_violation_is_conflict() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_username()
            .returning(|_| Ok(None));
        directory.expect_find_by_email().returning(|_| Ok(None));
        directory.expect_insert().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()))
        });

        let result = service(directory).register(register_alice()).await;
        assert!(matches!(
            result,
            Err(AuthError::Conflict(ConflictField::Email))
        ));
    }

    #[tokio::test]
    async fn test_register_directory_unavailable() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_username()
            .returning(|_| Err(UserError::DirectoryUnavailable("connection refused".to_string())));

        let result = service(directory).register(register_alice()).await;
        assert!(matches!(result, Err(AuthError::DirectoryUnavailable(_))));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let hash = PasswordHasher::new().hash("secret1").unwrap();
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_username()
            .withf(|username| username.as_str() == "alice")
            .times(1)
            .returning(move |_| Ok(Some(alice(hash.clone()))));

        let identity = service(directory)
            .authenticate(&credentials("alice", "secret1"))
            .await
            .expect("Authentication failed");

        assert_eq!(identity.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let hash = PasswordHasher::new().hash("secret1").unwrap();
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_username()
            .returning(move |_| Ok(Some(alice(hash.clone()))));

        let result = service(directory)
            .authenticate(&credentials("alice", "wrongpass"))
            .await;
        assert!(matches!(result, Err(AuthError::AuthFailure)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user_same_failure() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_username()
            .returning(|_| Ok(None));

        let result = service(directory)
            .authenticate(&credentials("nobody", "secret1"))
            .await;
        assert!(matches!(result, Err(AuthError::AuthFailure)));
    }

    #[tokio::test]
    async fn test_authenticate_invalid_username_is_failure() {
        let mut directory = MockTestUserDirectory::new();
        directory.expect_find_by_username().times(0);

        let result = service(directory)
            .authenticate(&credentials("", "secret1"))
            .await;
        assert!(matches!(result, Err(AuthError::AuthFailure)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user_still_pays_for_verification() {
        let mut directory = MockTestUserDirectory::new();
        directory.expect_find_by_username().returning(|_| Ok(None));
        let service = service(directory);

        let started = std::time::Instant::now();
        let result = service.authenticate(&credentials("ghost", "secret1")).await;

        assert!(matches!(result, Err(AuthError::AuthFailure)));
        // A lookup alone returns in microseconds; Argon2 fills 19 MiB
        assert!(started.elapsed() >= std::time::Duration::from_millis(1));
    }

    #[tokio::test]
    async fn test_authenticate_corrupt_stored_hash_is_failure() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_username()
            .returning(|_| Ok(Some(alice("not-a-phc-string".to_string()))));

        let result = service(directory)
            .authenticate(&credentials("alice", "secret1"))
            .await;
        assert!(matches!(result, Err(AuthError::AuthFailure)));
    }

    #[tokio::test]
    async fn test_login_then_authorize() {
        let hash = PasswordHasher::new().hash("secret1").unwrap();
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_username()
            .times(2)
            .returning(move |_| Ok(Some(alice(hash.clone()))));

        let service = service(directory);
        let access = service
            .login(&credentials("alice", "secret1"))
            .await
            .expect("Login failed");

        assert_eq!(access.expires_in_seconds, 30 * 60);

        let identity = service
            .authorize(&access.token)
            .await
            .expect("Authorization failed");
        assert_eq!(identity.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_authorize_rejects_removed_user() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(directory);
        let identity = Identity::from(alice("$argon2id$hash".to_string()));
        let access = service.issue_token(&identity).expect("Issue failed");

        let result = service.authorize(&access.token).await;
        assert!(matches!(
            result,
            Err(AuthError::Rejected(RejectionReason::UnknownSubject(_)))
        ));
    }

    #[tokio::test]
    async fn test_authorize_rejects_truncated_token_without_lookup() {
        let mut directory = MockTestUserDirectory::new();
        directory.expect_find_by_username().times(0);

        let service = service(directory);
        let identity = Identity::from(alice("$argon2id$hash".to_string()));
        let access = service.issue_token(&identity).expect("Issue failed");
        let truncated = &access.token[..access.token.len() - 1];

        let result = service.authorize(truncated).await;
        assert!(matches!(result, Err(AuthError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_authorize_expiry_boundary() {
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(alice("$argon2id$hash".to_string()))));

        let service = service(directory);
        let now = 1_700_000_000;

        let expired = jwt_handler()
            .encode(&Claims {
                sub: "alice".to_string(),
                iat: now - 600,
                exp: now - 1,
            })
            .unwrap();
        let result = service.authorize_at(&expired, now).await;
        assert!(matches!(
            result,
            Err(AuthError::Rejected(RejectionReason::Expired))
        ));

        let fresh = jwt_handler()
            .encode(&Claims {
                sub: "alice".to_string(),
                iat: now - 600,
                exp: now + 1,
            })
            .unwrap();
        assert!(service.authorize_at(&fresh, now).await.is_ok());
    }

    #[tokio::test]
    async fn test_authorize_wrong_secret_is_invalid_signature() {
        let mut directory = MockTestUserDirectory::new();
        directory.expect_find_by_username().times(0);

        let other = JwtHandler::new(b"a_different_secret_of_32_bytes_or_more", Algorithm::HS256)
            .unwrap();
        let token = other
            .encode(&Claims::new("alice", Utc::now(), Duration::minutes(5)).unwrap())
            .unwrap();

        let result = service(directory).authorize(&token).await;
        assert!(matches!(
            result,
            Err(AuthError::Rejected(RejectionReason::InvalidSignature))
        ));
    }

    #[tokio::test]
    async fn test_authorize_directory_unavailable_is_not_rejection() {
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_username()
            .returning(|_| Err(UserError::DirectoryUnavailable("timeout".to_string())));

        let service = service(directory);
        let identity = Identity::from(alice("$argon2id$hash".to_string()));
        let access = service.issue_token(&identity).expect("Issue failed");

        let result = service.authorize(&access.token).await;
        assert!(matches!(result, Err(AuthError::DirectoryUnavailable(_))));
    }
}
