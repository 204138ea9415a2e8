use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_movie_id;
use super::ApiError;
use super::ApiSuccess;
use super::MovieData;
use crate::inbound::http::router::AppState;

pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<ApiSuccess<MovieData>, ApiError> {
    let movie_id = parse_movie_id(&movie_id)?;

    state
        .movie_service
        .get_movie(movie_id)
        .await
        .map_err(ApiError::from)
        .map(|ref movie| ApiSuccess::new(StatusCode::OK, movie.into()))
}
