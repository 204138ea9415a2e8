use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::Password;
use crate::inbound::http::extract::FormBody;
use crate::inbound::http::router::AppState;

/// Exchange a username/password pair for a bearer token.
pub async fn issue_token(
    State(state): State<AppState>,
    FormBody(body): FormBody<TokenRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let credentials = Credentials {
        username: body.username,
        password: Password::unchecked(body.password),
    };

    let access = state.auth_service.login(&credentials).await.map_err(|e| {
        tracing::info!(username = %credentials.username, "Login refused");
        ApiError::from(e)
    })?;

    tracing::info!(username = %credentials.username, "Access token issued");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            access_token: access.token,
            token_type: "bearer".to_string(),
            expires_in: access.expires_in_seconds,
        },
    ))
}

/// Form body, as sent by OAuth2 password-flow clients.
#[derive(Clone, Deserialize)]
pub struct TokenRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}
