use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MovieData;
use crate::domain::movie::models::Page;
use crate::inbound::http::extract::QueryParams;
use crate::inbound::http::router::AppState;

pub async fn list_movies(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListMoviesParams>,
) -> Result<ApiSuccess<Vec<MovieData>>, ApiError> {
    let page = params.try_into_page()?;

    state
        .movie_service
        .list_movies(page)
        .await
        .map_err(ApiError::from)
        .map(|movies| {
            ApiSuccess::new(StatusCode::OK, movies.iter().map(MovieData::from).collect())
        })
}

#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListMoviesParams {
    fn try_into_page(self) -> Result<Page, ApiError> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(Page::DEFAULT_LIMIT);

        if skip < 0 {
            return Err(ApiError::UnprocessableEntity(
                "skip must not be negative".to_string(),
            ));
        }
        if !(1..=Page::MAX_LIMIT).contains(&limit) {
            return Err(ApiError::UnprocessableEntity(format!(
                "limit must be between 1 and {}",
                Page::MAX_LIMIT
            )));
        }

        Ok(Page { skip, limit })
    }
}
