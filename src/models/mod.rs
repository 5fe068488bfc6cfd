//! Database models for the weather forecast service

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A saved forecast record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeatherLog {
    pub id: i32,
    pub user_name: String,
    pub city: String,
    pub weather_data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// API representation of a saved forecast
#[derive(Debug, Clone, Serialize)]
pub struct WeatherLogResponse {
    pub id: i32,
    pub user_name: String,
    pub city: String,
    pub weather_data: serde_json::Value,
    /// Formatted as "YYYY-MM-DD HH:MM"
    pub timestamp: String,
}

impl WeatherLog {
    /// Convert a row into its API representation
    pub fn into_response(self) -> WeatherLogResponse {
        WeatherLogResponse {
            id: self.id,
            user_name: self.user_name,
            city: self.city,
            weather_data: self.weather_data,
            timestamp: self.timestamp.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}
