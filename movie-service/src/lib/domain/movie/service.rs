use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::CreateMovieCommand;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::Page;
use crate::domain::movie::models::UpdateMovieCommand;
use crate::domain::movie::ports::MovieRepository;
use crate::domain::movie::ports::MovieServicePort;

/// Domain service implementation for movie operations.
pub struct MovieService<MR>
where
    MR: MovieRepository,
{
    repository: Arc<MR>,
}

impl<MR> MovieService<MR>
where
    MR: MovieRepository,
{
    pub fn new(repository: Arc<MR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<MR> MovieServicePort for MovieService<MR>
where
    MR: MovieRepository,
{
    async fn create_movie(&self, command: CreateMovieCommand) -> Result<Movie, MovieError> {
        let movie = self.repository.create(command).await?;
        tracing::info!(movie_id = %movie.id, title = movie.title.as_str(), "Movie created");
        Ok(movie)
    }

    async fn get_movie(&self, id: MovieId) -> Result<Movie, MovieError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn list_movies(&self, page: Page) -> Result<Vec<Movie>, MovieError> {
        self.repository.list(page).await
    }

    async fn update_movie(
        &self,
        id: MovieId,
        command: UpdateMovieCommand,
    ) -> Result<Movie, MovieError> {
        let mut movie = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(MovieError::NotFound(id))?;

        command.apply_to(&mut movie);

        self.repository.update(movie).await
    }

    async fn delete_movie(&self, id: MovieId) -> Result<(), MovieError> {
        self.repository.delete(id).await?;
        tracing::info!(movie_id = %id, "Movie deleted");
        Ok(())
    }
}
