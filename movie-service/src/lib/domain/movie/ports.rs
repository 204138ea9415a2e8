use async_trait::async_trait;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::CreateMovieCommand;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::Page;
use crate::domain::movie::models::UpdateMovieCommand;

/// Port for movie domain service operations.
#[async_trait]
pub trait MovieServicePort: Send + Sync + 'static {
    async fn create_movie(&self, command: CreateMovieCommand) -> Result<Movie, MovieError>;

    /// # Errors
    /// * `NotFound` - Movie does not exist
    async fn get_movie(&self, id: MovieId) -> Result<Movie, MovieError>;

    async fn list_movies(&self, page: Page) -> Result<Vec<Movie>, MovieError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Movie does not exist
    async fn update_movie(
        &self,
        id: MovieId,
        command: UpdateMovieCommand,
    ) -> Result<Movie, MovieError>;

    /// # Errors
    /// * `NotFound` - Movie does not exist
    async fn delete_movie(&self, id: MovieId) -> Result<(), MovieError>;
}

/// Persistence operations for movie records.
#[async_trait]
pub trait MovieRepository: Send + Sync + 'static {
    /// Persist a new movie and return it with its assigned id.
    async fn create(&self, command: CreateMovieCommand) -> Result<Movie, MovieError>;

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, MovieError>;

    /// Movies ordered by id, windowed by `page`.
    async fn list(&self, page: Page) -> Result<Vec<Movie>, MovieError>;

    /// Overwrite every field of an existing movie.
    ///
    /// # Errors
    /// * `NotFound` - Movie does not exist
    async fn update(&self, movie: Movie) -> Result<Movie, MovieError>;

    /// # Errors
    /// * `NotFound` - Movie does not exist
    async fn delete(&self, id: MovieId) -> Result<(), MovieError>;

    async fn count(&self) -> Result<i64, MovieError>;
}
