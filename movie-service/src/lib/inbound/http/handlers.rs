use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use http::header::WWW_AUTHENTICATE;
use http::HeaderValue;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::movie::errors::MovieError;

pub mod create_movie;
pub mod delete_movie;
pub mod get_movie;
pub mod list_movies;
pub mod register_user;
pub mod root;
pub mod token;
pub mod update_movie;

/// Successful response: status code plus the JSON body as-is.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    /// Carries a `WWW-Authenticate: Bearer` challenge.
    Unauthorized(String),
}

impl ApiError {
    /// Uniform response for any rejected bearer token.
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let challenge = matches!(self, ApiError::Unauthorized(_));
        let message = match self {
            ApiError::InternalServerError(msg)
            | ApiError::UnprocessableEntity(msg)
            | ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg) => msg,
        };

        let mut response = (status, Json(ApiErrorData { message })).into_response();
        if challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthFailure => {
                ApiError::Unauthorized("Incorrect username or password".to_string())
            }
            AuthError::Conflict(_) => ApiError::BadRequest(err.to_string()),
            AuthError::Rejected(reason) => {
                tracing::warn!(reason = %reason, "Bearer token rejected");
                ApiError::unauthorized()
            }
            AuthError::DirectoryUnavailable(_) | AuthError::Internal(_) => {
                tracing::error!(error = %err, "Authentication backend failure");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(_) => ApiError::NotFound(err.to_string()),
            MovieError::InvalidTitle(_)
            | MovieError::InvalidGenre(_)
            | MovieError::InvalidYear(_)
            | MovieError::InvalidRating(_) => ApiError::UnprocessableEntity(err.to_string()),
            MovieError::DatabaseError(_) => {
                tracing::error!(error = %err, "Movie store failure");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Plain `{ "message": ... }` body for acknowledgements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

/// Movie as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieData {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub year: i32,
    pub rating: String,
}

impl From<&Movie> for MovieData {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.0,
            title: movie.title.as_str().to_string(),
            genre: movie.genre.as_str().to_string(),
            year: movie.year.value(),
            rating: movie.rating.as_str().to_string(),
        }
    }
}

/// Parse the `:movie_id` path segment.
pub(crate) fn parse_movie_id(raw: &str) -> Result<MovieId, ApiError> {
    raw.parse::<i64>()
        .map(MovieId)
        .map_err(|_| ApiError::UnprocessableEntity(format!("Invalid movie id: {}", raw)))
}
