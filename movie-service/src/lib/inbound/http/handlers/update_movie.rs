use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::parse_movie_id;
use super::ApiError;
use super::ApiSuccess;
use super::MovieData;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Rating;
use crate::domain::movie::models::ReleaseYear;
use crate::domain::movie::models::Title;
use crate::domain::movie::models::UpdateMovieCommand;
use crate::inbound::http::extract::JsonBody;
use crate::inbound::http::router::AppState;
use crate::movie::errors::MovieError;

/// HTTP request body for updating a movie; omitted fields are left as they are.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<String>,
}

impl UpdateMovieRequest {
    fn try_into_command(self) -> Result<UpdateMovieCommand, MovieError> {
        Ok(UpdateMovieCommand {
            title: self.title.map(Title::new).transpose()?,
            genre: self.genre.map(Genre::new).transpose()?,
            year: self.year.map(ReleaseYear::new).transpose()?,
            rating: self.rating.map(|r| r.parse::<Rating>()).transpose()?,
        })
    }
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    JsonBody(body): JsonBody<UpdateMovieRequest>,
) -> Result<ApiSuccess<MovieData>, ApiError> {
    let movie_id = parse_movie_id(&movie_id)?;
    let command = body.try_into_command()?;

    state
        .movie_service
        .update_movie(movie_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref movie| ApiSuccess::new(StatusCode::OK, movie.into()))
}
