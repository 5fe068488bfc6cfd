//! Weather forecast service
//!
//! Fetches 5-day/3-hour forecasts from OpenWeatherMap, derives a daily
//! forecast per city, and stores user-attributed forecast payloads in
//! PostgreSQL.

use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;

pub use config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::app_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
