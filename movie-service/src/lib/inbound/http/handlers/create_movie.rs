use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MovieData;
use crate::domain::movie::models::CreateMovieCommand;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Rating;
use crate::domain::movie::models::ReleaseYear;
use crate::domain::movie::models::Title;
use crate::inbound::http::extract::JsonBody;
use crate::inbound::http::router::AppState;
use crate::movie::errors::MovieError;

pub async fn create_movie(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateMovieRequest>,
) -> Result<ApiSuccess<MovieData>, ApiError> {
    state
        .movie_service
        .create_movie(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref movie| ApiSuccess::new(StatusCode::CREATED, movie.into()))
}

/// HTTP request body for creating a movie (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovieRequest {
    title: String,
    genre: String,
    year: i32,
    rating: String,
}

impl CreateMovieRequest {
    fn try_into_command(self) -> Result<CreateMovieCommand, MovieError> {
        Ok(CreateMovieCommand {
            title: Title::new(self.title)?,
            genre: Genre::new(self.genre)?,
            year: ReleaseYear::new(self.year)?,
            rating: self.rating.parse::<Rating>()?,
        })
    }
}
