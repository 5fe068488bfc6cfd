//! Route definitions for the weather forecast service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create the application routes
pub fn app_routes() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(handlers::index))
        .route("/get_weather", post(handlers::get_weather))
        .route("/save_forecast", post(handlers::save_forecast))
        .route("/user_forecasts/:user_name", get(handlers::user_forecasts))
        // Health check
        .route("/healthz", get(handlers::healthz))
        // JSON API
        .nest("/api", api_routes())
}

/// JSON API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(handlers::api_weather))
        .route("/recent", get(handlers::api_recent))
        .route("/users", get(handlers::api_users))
        .route("/forecasts", get(handlers::api_forecasts))
}
