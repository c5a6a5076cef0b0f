//! FitLog Server
//!
//! Exercise-tracking REST service: registers users, records timed
//! exercise entries against them, and serves filtered, sorted logs.
//! Storage is either an embedded SQLite database or an in-memory
//! store, selected at startup.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod services;
pub mod storage;

use axum::{
    routing::{get, post},
    Router,
};
use services::TrackerService;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<TrackerService>,
}

/// Build the application router: REST API under `/api`, a health
/// check, and the static browser client as the fallback.
pub fn app(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
        .fallback_service(ServeDir::new(PathBuf::from(static_dir)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::users::list).post(handlers::users::register),
        )
        .route("/users/:id/exercises", post(handlers::exercises::add))
        .route("/users/:id/logs", get(handlers::exercises::logs))
}
