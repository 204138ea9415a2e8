use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_movie::create_movie;
use super::handlers::delete_movie::delete_movie;
use super::handlers::get_movie::get_movie;
use super::handlers::list_movies::list_movies;
use super::handlers::register_user::register_user;
use super::handlers::root::root;
use super::handlers::token::issue_token;
use super::handlers::update_movie::update_movie;
use super::middleware::require_bearer;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::movie::ports::MovieServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub movie_service: Arc<dyn MovieServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    movie_service: Arc<dyn MovieServicePort>,
) -> Router {
    let state = AppState {
        auth_service,
        movie_service,
    };

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/token", post(issue_token))
        .route("/users", post(register_user))
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/:movie_id", get(get_movie).put(update_movie));

    let protected_routes = Router::new()
        .route("/movies/:movie_id", delete(delete_movie))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
