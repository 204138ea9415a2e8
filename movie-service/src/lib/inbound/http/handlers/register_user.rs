use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Identity;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::extract::JsonBody;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordError;
use crate::user::errors::UsernameError;

pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterUserRequest>,
) -> Result<ApiSuccess<RegisterUserResponseData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::CREATED, identity.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Clone, Deserialize)]
pub struct RegisterUserRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterUserRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterUserRequestError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterUserCommand::new(username, email, password))
    }
}

impl From<ParseRegisterUserRequestError> for ApiError {
    fn from(err: ParseRegisterUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterUserResponseData {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&Identity> for RegisterUserResponseData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.0,
            username: identity.username.as_str().to_string(),
            email: identity.email.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        let command = request("alice", "alice@x.com", "secret1")
            .try_into_command()
            .expect("Request should be valid");

        assert_eq!(command.username.as_str(), "alice");
        assert_eq!(command.password.expose(), "secret1");
    }

    #[test]
    fn test_short_password() {
        let result = request("alice", "alice@x.com", "12345").try_into_command();
        assert!(matches!(
            result,
            Err(ParseRegisterUserRequestError::Password(_))
        ));
    }

    #[test]
    fn test_invalid_email() {
        let result = request("alice", "alice", "secret1").try_into_command();
        assert!(matches!(result, Err(ParseRegisterUserRequestError::Email(_))));
    }
}
