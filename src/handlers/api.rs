//! JSON API handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::external::weather::ForecastSample;
use crate::models::{WeatherLog, WeatherLogResponse};
use crate::services::{weather_log::ForecastPage, ForecastService, WeatherLogService};
use crate::AppState;

/// Query parameters for the weather fetch endpoint
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub city: String,
}

#[derive(Serialize)]
pub struct ForecastListResponse {
    pub list: Vec<ForecastSample>,
}

/// GET /api/weather?city=CityName
///
/// Fetches weather server-side so the API key never reaches the frontend.
pub async fn api_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<ForecastListResponse>> {
    let city = query.city.trim();
    if city.is_empty() {
        return Err(AppError::InvalidInput(
            "City parameter is required".to_string(),
        ));
    }

    let service = ForecastService::new(&state.config.openweather);
    let list = service.fetch_forecast(city).await?;
    Ok(Json(ForecastListResponse { list }))
}

/// Query parameters for the per-user recent endpoint
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default)]
    pub user_name: String,
}

/// GET /api/recent?user_name=Alice
///
/// A missing or blank user name yields an empty array, not an error.
pub async fn api_recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<Vec<WeatherLogResponse>>> {
    let user_name = query.user_name.trim();
    if user_name.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let service = WeatherLogService::new(state.db);
    let logs = service
        .user_forecasts(user_name, state.config.app.user_forecast_limit)
        .await?;
    Ok(Json(logs.into_iter().map(WeatherLog::into_response).collect()))
}

#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<String>,
}

/// GET /api/users
pub async fn api_users(State(state): State<AppState>) -> AppResult<Json<UsersResponse>> {
    let service = WeatherLogService::new(state.db);
    let users = service.users().await?;
    Ok(Json(UsersResponse { users }))
}

/// Query parameters for the paginated listing
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// GET /api/forecasts?page=1&per_page=10
pub async fn api_forecasts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ForecastPage>> {
    let service = WeatherLogService::new(state.db);
    let page = service
        .paginate(
            query.page.unwrap_or(1),
            query.per_page.unwrap_or(state.config.app.items_per_page),
        )
        .await?;
    Ok(Json(page))
}
