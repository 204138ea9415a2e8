use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::CreateMovieCommand;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::Page;
use crate::domain::movie::models::Rating;
use crate::domain::movie::models::ReleaseYear;
use crate::domain::movie::models::Title;
use crate::domain::movie::ports::MovieRepository;

pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MovieRow {
    id: i64,
    title: String,
    genre: String,
    year: i32,
    rating: String,
}

impl TryFrom<MovieRow> for Movie {
    type Error = MovieError;

    fn try_from(row: MovieRow) -> Result<Self, Self::Error> {
        Ok(Movie {
            id: MovieId(row.id),
            title: Title::new(row.title)?,
            genre: Genre::new(row.genre)?,
            year: ReleaseYear::new(row.year)?,
            rating: row.rating.parse::<Rating>()?,
        })
    }
}

fn database_error(e: sqlx::Error) -> MovieError {
    MovieError::DatabaseError(e.to_string())
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn create(&self, command: CreateMovieCommand) -> Result<Movie, MovieError> {
        sqlx::query_as::<_, MovieRow>(
            r#"
            INSERT INTO movies (title, genre, year, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, genre, year, rating
            "#,
        )
        .bind(command.title.as_str())
        .bind(command.genre.as_str())
        .bind(command.year.value())
        .bind(command.rating.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?
        .try_into()
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, MovieError> {
        sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, genre, year, rating
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Movie::try_from)
        .transpose()
    }

    async fn list(&self, page: Page) -> Result<Vec<Movie>, MovieError> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, genre, year, rating
            FROM movies
            ORDER BY id
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Movie::try_from).collect()
    }

    async fn update(&self, movie: Movie) -> Result<Movie, MovieError> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = $2, genre = $3, year = $4, rating = $5
            WHERE id = $1
            "#,
        )
        .bind(movie.id.0)
        .bind(movie.title.as_str())
        .bind(movie.genre.as_str())
        .bind(movie.year.value())
        .bind(movie.rating.as_str())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(MovieError::NotFound(movie.id));
        }

        Ok(movie)
    }

    async fn delete(&self, id: MovieId) -> Result<(), MovieError> {
        let result = sqlx::query(
            r#"
            DELETE FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(MovieError::NotFound(id));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, MovieError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }
}
