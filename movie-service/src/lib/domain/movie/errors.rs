use thiserror::Error;

use crate::domain::movie::models::MovieId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenreError {
    #[error("Genre too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReleaseYearError {
    #[error("Year must be a four digit number, got {0}")]
    OutOfRange(i32),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating must be A, B or C, got {0:?}")]
    Unknown(String),
}

/// Top-level error for all movie-related operations
#[derive(Debug, Clone, Error)]
pub enum MovieError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Invalid genre: {0}")]
    InvalidGenre(#[from] GenreError),

    #[error("Invalid year: {0}")]
    InvalidYear(#[from] ReleaseYearError),

    #[error("Invalid rating: {0}")]
    InvalidRating(#[from] RatingError),

    #[error("Movie with id {0} not found")]
    NotFound(MovieId),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
