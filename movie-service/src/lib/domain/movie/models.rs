use std::fmt;
use std::str::FromStr;

use crate::domain::movie::errors::GenreError;
use crate::domain::movie::errors::RatingError;
use crate::domain::movie::errors::ReleaseYearError;
use crate::domain::movie::errors::TitleError;

/// Movie record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: Title,
    pub genre: Genre,
    pub year: ReleaseYear,
    pub rating: Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovieId(pub i64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Movie title, at least 2 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    const MIN_LENGTH: usize = 2;

    pub fn new(title: String) -> Result<Self, TitleError> {
        let length = title.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(TitleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Movie genre, at least 4 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre(String);

impl Genre {
    const MIN_LENGTH: usize = 4;

    pub fn new(genre: String) -> Result<Self, GenreError> {
        let length = genre.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(GenreError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(genre))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Four digit release year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseYear(i32);

impl ReleaseYear {
    pub fn new(year: i32) -> Result<Self, ReleaseYearError> {
        if (1000..=9999).contains(&year) {
            Ok(Self(year))
        } else {
            Err(ReleaseYearError::OutOfRange(year))
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Audience rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    A,
    B,
    C,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::A => "A",
            Rating::B => "B",
            Rating::C => "C",
        }
    }
}

impl FromStr for Rating {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Rating::A),
            "B" => Ok(Rating::B),
            "C" => Ok(Rating::C),
            other => Err(RatingError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to create a new movie with domain types
#[derive(Debug, Clone)]
pub struct CreateMovieCommand {
    pub title: Title,
    pub genre: Genre,
    pub year: ReleaseYear,
    pub rating: Rating,
}

/// Partial update: only provided fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateMovieCommand {
    pub title: Option<Title>,
    pub genre: Option<Genre>,
    pub year: Option<ReleaseYear>,
    pub rating: Option<Rating>,
}

impl UpdateMovieCommand {
    /// Apply every provided field to `movie`, leaving the rest untouched.
    pub fn apply_to(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(genre) = self.genre {
            movie.genre = genre;
        }
        if let Some(year) = self.year {
            movie.year = year;
        }
        if let Some(rating) = self.rating {
            movie.rating = rating;
        }
    }
}

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 100;
    pub const MAX_LIMIT: i64 = 100;
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
