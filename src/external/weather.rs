//! OpenWeatherMap client for the 5-day/3-hour forecast endpoint
//!
//! The upstream envelope is interpreted here: transport failures map to
//! typed timeout/unreachable errors, and an error body (non-2xx status or
//! embedded `cod != "200"`) surfaces the upstream `message` verbatim.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

/// Daily temperature range attached to a midday representative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTemps {
    pub min: f64,
    pub max: f64,
    pub current: f64,
}

/// The `main` block of an upstream sample
///
/// Only `temp` is read; everything else passes through untouched so a saved
/// payload stays byte-equivalent to what the provider sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleMain {
    #[serde(default)]
    pub temp: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of an upstream sample's `weather` array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherDescriptor {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One 3-hour interval sample from the upstream forecast list
///
/// Fields default rather than fail on absence; upstream data is assumed
/// well-formed but a malformed sample must not abort the whole fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Combined timestamp, e.g. "2024-06-01 15:00:00"
    #[serde(default)]
    pub dt_txt: String,
    #[serde(default)]
    pub main: SampleMain,
    #[serde(default)]
    pub weather: Vec<WeatherDescriptor>,
    /// Present only on daily-aggregated entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_temps: Option<DailyTemps>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WeatherClient {
    /// Create a new WeatherClient against the production endpoint
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self::with_base_url(
            api_key,
            "https://api.openweathermap.org/data/2.5".to_string(),
            timeout,
        )
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            timeout,
        }
    }

    /// Fetch the raw 3-hour interval sample list for a city
    ///
    /// Single attempt, bounded by the configured timeout, never retried.
    pub async fn fetch_forecast_samples(&self, city: &str) -> AppResult<Vec<ForecastSample>> {
        let url = format!("{}/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", &self.api_key), ("units", "metric")])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(classify_transport_error)?;

        // The provider reports errors both ways: HTTP status and an embedded
        // string status code. A body that is not JSON counts as an error body.
        let data: Value =
            serde_json::from_str(&body).unwrap_or_else(|_| Value::Object(Map::new()));

        if !status.is_success() || data.get("cod").and_then(Value::as_str) != Some("200") {
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| "City not found or API error".to_string());
            return Err(AppError::Upstream(message));
        }

        let list = data
            .get("list")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));

        serde_json::from_value(list)
            .map_err(|e| AppError::Upstream(format!("Malformed forecast response: {}", e)))
    }
}

fn classify_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::UpstreamTimeout
    } else if e.is_connect() {
        AppError::UpstreamUnreachable
    } else {
        tracing::error!("Weather API request error: {}", e);
        AppError::Upstream("Error contacting weather service".to_string())
    }
}
