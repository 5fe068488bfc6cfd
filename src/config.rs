//! Configuration management for the weather forecast service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WEATHERLOG_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// OpenWeather API configuration
    pub openweather: OpenWeatherConfig,

    /// Application behavior settings
    pub app: AppSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL (required; startup fails without it)
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenWeatherConfig {
    /// OpenWeather API base endpoint
    pub api_endpoint: String,

    /// OpenWeather API key; an empty key degrades each fetch to a handled
    /// configuration error rather than failing startup
    pub api_key: String,

    /// Upstream request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    /// Recent forecasts shown on the index page and default API page size
    pub items_per_page: i64,

    /// Saved forecasts returned per user
    pub user_forecast_limit: i64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("WEATHERLOG_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default(
                "openweather.api_endpoint",
                "https://api.openweathermap.org/data/2.5",
            )?
            .set_default("openweather.api_key", "")?
            .set_default("openweather.timeout_seconds", 10)?
            .set_default("app.items_per_page", 10)?
            .set_default("app.user_forecast_limit", 5)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WEATHERLOG_ prefix)
            .add_source(
                Environment::with_prefix("WEATHERLOG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
