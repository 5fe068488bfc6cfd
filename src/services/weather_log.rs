//! Persistence of saved forecasts
//!
//! Saved records are insert-only; reads are by recency, by user, or paged.

use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{WeatherLog, WeatherLogResponse};
use crate::validation::is_valid_forecast_payload;

/// Largest page size a client may request
const MAX_PER_PAGE: i64 = 50;

/// Service for managing saved forecast records
#[derive(Clone)]
pub struct WeatherLogService {
    db: PgPool,
}

/// One page of saved forecasts
#[derive(Debug, serde::Serialize)]
pub struct ForecastPage {
    pub forecasts: Vec<WeatherLogResponse>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
    pub per_page: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl WeatherLogService {
    /// Create a new WeatherLogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Save a validated forecast payload under a user name.
    ///
    /// The payload is stored exactly as submitted; the write timestamp is
    /// assigned by the database.
    pub async fn save(
        &self,
        user_name: &str,
        city: &str,
        weather_data: serde_json::Value,
    ) -> AppResult<WeatherLog> {
        let user_name = user_name.trim();
        let city = city.trim();

        if user_name.is_empty() || city.is_empty() {
            return Err(AppError::InvalidInput(
                "User name and city are required".to_string(),
            ));
        }

        if !is_valid_forecast_payload(&weather_data) {
            return Err(AppError::InvalidInput(
                "Invalid forecast data structure".to_string(),
            ));
        }

        let log = sqlx::query_as::<_, WeatherLog>(
            r#"
            INSERT INTO weather_logs (user_name, city, weather_data)
            VALUES ($1, $2, $3)
            RETURNING id, user_name, city, weather_data, timestamp
            "#,
        )
        .bind(user_name)
        .bind(city)
        .bind(&weather_data)
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Saved forecast: user={} city={}", user_name, city);
        Ok(log)
    }

    /// Most recent saves across all users
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<WeatherLog>> {
        let logs = sqlx::query_as::<_, WeatherLog>(
            r#"
            SELECT id, user_name, city, weather_data, timestamp
            FROM weather_logs
            ORDER BY timestamp DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(logs)
    }

    /// Most recent saves for a specific user
    pub async fn user_forecasts(&self, user_name: &str, limit: i64) -> AppResult<Vec<WeatherLog>> {
        let logs = sqlx::query_as::<_, WeatherLog>(
            r#"
            SELECT id, user_name, city, weather_data, timestamp
            FROM weather_logs
            WHERE user_name = $1
            ORDER BY timestamp DESC
            LIMIT $2
            "#,
        )
        .bind(user_name)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(logs)
    }

    /// Distinct user names that have saved forecasts, ascending
    pub async fn users(&self) -> AppResult<Vec<String>> {
        let users = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT user_name FROM weather_logs ORDER BY user_name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    /// Paged listing of all saves, newest first
    pub async fn paginate(&self, page: i64, per_page: i64) -> AppResult<ForecastPage> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PER_PAGE);

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM weather_logs")
                .fetch_one(&self.db)
                .await?;

        let logs = sqlx::query_as::<_, WeatherLog>(
            r#"
            SELECT id, user_name, city, weather_data, timestamp
            FROM weather_logs
            ORDER BY timestamp DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.db)
        .await?;

        let pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };

        Ok(ForecastPage {
            forecasts: logs.into_iter().map(WeatherLog::into_response).collect(),
            total,
            pages,
            current_page: page,
            per_page,
            has_next: page < pages,
            has_prev: page > 1,
        })
    }
}
