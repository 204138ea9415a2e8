use std::sync::Arc;

use auth::JwtHandler;
use auth::TokenIssuer;
use movie_service::config::Config;
use movie_service::domain::auth::errors::AuthError;
use movie_service::domain::auth::ports::AuthServicePort;
use movie_service::domain::auth::service::AuthService;
use movie_service::domain::movie::models::CreateMovieCommand;
use movie_service::domain::movie::models::Genre;
use movie_service::domain::movie::models::Rating;
use movie_service::domain::movie::models::ReleaseYear;
use movie_service::domain::movie::models::Title;
use movie_service::domain::movie::ports::MovieRepository;
use movie_service::domain::user::models::EmailAddress;
use movie_service::domain::user::models::Password;
use movie_service::domain::user::models::RegisterUserCommand;
use movie_service::domain::user::models::Username;
use movie_service::domain::user::ports::UserDirectory;
use movie_service::outbound::repositories::PostgresMovieRepository;
use movie_service::outbound::repositories::PostgresUserDirectory;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEMO_PASSWORD: &str = "admin123";

const SAMPLE_MOVIES: [(&str, &str, i32, Rating); 5] = [
    ("Matrix", "Science Fiction", 1999, Rating::B),
    ("The Godfather", "Drama", 1972, Rating::C),
    ("Interstellar", "Science Fiction", 2014, Rating::B),
    ("Titanic", "Romance", 1997, Rating::A),
    ("Avatar", "Adventure", 2009, Rating::A),
];

/// Populate an empty database with a demo user and a handful of movies.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info,movie_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let user_directory = Arc::new(PostgresUserDirectory::new(pg_pool.clone()));
    let movie_repository = PostgresMovieRepository::new(pg_pool);

    if user_directory.count().await? == 0 {
        let password = std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("SEED_ADMIN_PASSWORD not set, using the demo password");
            DEMO_PASSWORD.to_string()
        });

        let jwt_handler =
            JwtHandler::new(config.jwt.secret.as_bytes(), config.jwt.algorithm()?)?;
        let auth_service = AuthService::new(
            Arc::clone(&user_directory),
            TokenIssuer::new(jwt_handler, config.jwt.ttl()),
        );

        let command = RegisterUserCommand::new(
            Username::new("admin".to_string())?,
            EmailAddress::new("admin@example.com".to_string())?,
            Password::new(password)?,
        );

        match auth_service.register(command).await {
            Ok(identity) => tracing::info!(username = %identity.username, "Demo user created"),
            Err(AuthError::Conflict(field)) => {
                tracing::info!(field = %field, "Demo user already present")
            }
            Err(e) => return Err(e.into()),
        }
    }

    if movie_repository.count().await? == 0 {
        for (title, genre, year, rating) in SAMPLE_MOVIES {
            let movie = movie_repository
                .create(CreateMovieCommand {
                    title: Title::new(title.to_string())?,
                    genre: Genre::new(genre.to_string())?,
                    year: ReleaseYear::new(year)?,
                    rating,
                })
                .await?;
            tracing::info!(movie_id = %movie.id, title = movie.title.as_str(), "Sample movie created");
        }
    } else {
        tracing::info!("Movies already present, skipping sample data");
    }

    tracing::info!("Seeding completed");
    Ok(())
}
