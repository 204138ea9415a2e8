use std::collections::BTreeMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::JwtHandler;
use auth::TokenIssuer;
use chrono::Duration;
use jsonwebtoken::Algorithm;
use movie_service::domain::auth::service::AuthService;
use movie_service::domain::movie::errors::MovieError;
use movie_service::domain::movie::models::CreateMovieCommand;
use movie_service::domain::movie::models::Movie;
use movie_service::domain::movie::models::MovieId;
use movie_service::domain::movie::models::Page;
use movie_service::domain::movie::ports::MovieRepository;
use movie_service::domain::movie::service::MovieService;
use movie_service::domain::user::errors::UserError;
use movie_service::domain::user::models::EmailAddress;
use movie_service::domain::user::models::NewUser;
use movie_service::domain::user::models::User;
use movie_service::domain::user::models::UserId;
use movie_service::domain::user::models::Username;
use movie_service::domain::user::ports::UserDirectory;
use movie_service::inbound::http::router::create_router;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub users: Arc<InMemoryUserDirectory>,
    pub movies: Arc<InMemoryMovieRepository>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserDirectory::default());
        let movies = Arc::new(InMemoryMovieRepository::default());

        let token_issuer = TokenIssuer::new(jwt_handler(), Duration::minutes(30));
        let auth_service = Arc::new(AuthService::new(Arc::clone(&users), token_issuer));
        let movie_service = Arc::new(MovieService::new(Arc::clone(&movies)));

        let router = create_router(auth_service, movie_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            users,
            movies,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.delete(path).bearer_auth(token)
    }

    /// Register a user and panic unless it succeeds.
    pub async fn register(&self, username: &str, email: &str, password: &str) {
        let response = self
            .post("/users")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Exchange credentials for a token through the form endpoint.
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the access token.
    pub async fn token(&self, username: &str, password: &str) -> String {
        let body: serde_json::Value = self
            .login(username, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    /// Create a movie and return its id.
    pub async fn create_movie(&self, title: &str) -> i64 {
        let body: serde_json::Value = self
            .post("/movies")
            .json(&serde_json::json!({
                "title": title,
                "genre": "Science Fiction",
                "year": 1999,
                "rating": "B"
            }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");
        body["id"].as_i64().expect("id missing")
    }
}

pub fn jwt_handler() -> JwtHandler {
    JwtHandler::new(JWT_SECRET, Algorithm::HS256).expect("HS256 is supported")
}

/// User directory kept in memory, with the same uniqueness rules as the table.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    next_id: AtomicI64,
    users: Mutex<Vec<User>>,
}

impl InMemoryUserDirectory {
    pub fn remove(&self, username: &str) {
        self.users
            .lock()
            .unwrap()
            .retain(|user| user.username.as_str() != username);
    }

    pub fn stored_hash(&self, username: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username.as_str() == username)
            .map(|user| user.password_hash.clone())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn insert(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let stored = User {
            id: UserId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| &user.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn count(&self) -> Result<i64, UserError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryMovieRepository {
    next_id: AtomicI64,
    movies: Mutex<BTreeMap<i64, Movie>>,
}

impl InMemoryMovieRepository {
    pub fn contains(&self, id: i64) -> bool {
        self.movies.lock().unwrap().contains_key(&id)
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn create(&self, command: CreateMovieCommand) -> Result<Movie, MovieError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let movie = Movie {
            id: MovieId(id),
            title: command.title,
            genre: command.genre,
            year: command.year,
            rating: command.rating,
        };
        self.movies.lock().unwrap().insert(id, movie.clone());
        Ok(movie)
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, MovieError> {
        Ok(self.movies.lock().unwrap().get(&id.0).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<Movie>, MovieError> {
        Ok(self
            .movies
            .lock()
            .unwrap()
            .values()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, movie: Movie) -> Result<Movie, MovieError> {
        let mut movies = self.movies.lock().unwrap();
        match movies.get_mut(&movie.id.0) {
            Some(stored) => {
                *stored = movie.clone();
                Ok(movie)
            }
            None => Err(MovieError::NotFound(movie.id)),
        }
    }

    async fn delete(&self, id: MovieId) -> Result<(), MovieError> {
        self.movies
            .lock()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or(MovieError::NotFound(id))
    }

    async fn count(&self) -> Result<i64, MovieError> {
        Ok(self.movies.lock().unwrap().len() as i64)
    }
}
