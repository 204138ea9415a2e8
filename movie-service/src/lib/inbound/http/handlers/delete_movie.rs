use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_movie_id;
use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Delete a movie. Only reachable through the bearer gate.
pub async fn delete_movie(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(movie_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let movie_id = parse_movie_id(&movie_id)?;

    state.movie_service.delete_movie(movie_id).await?;

    tracing::info!(
        movie_id = %movie_id,
        username = %user.identity.username,
        "Movie deleted by authenticated user"
    );

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: format!("Movie with id {} deleted", movie_id),
        },
    ))
}
