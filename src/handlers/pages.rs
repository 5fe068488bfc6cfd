//! HTML page handlers
//!
//! Pages are rendered as compact server-built HTML; user-provided text is
//! escaped before it reaches the page.

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::weather::ForecastSample;
use crate::models::WeatherLog;
use crate::services::{ForecastService, WeatherLogService};
use crate::AppState;

/// GET / - weather form plus the most recent saves
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let service = WeatherLogService::new(state.db.clone());
    // A store read failure renders an empty list rather than a failed page
    let recent = match service.recent(state.config.app.items_per_page).await {
        Ok(recent) => recent,
        Err(e) => {
            tracing::error!("Error fetching recent forecasts: {}", e);
            Vec::new()
        }
    };

    let mut body = String::from(
        r#"<h1>Weather Forecast</h1>
<form method="post" action="/get_weather">
  <label>Your name <input name="user_name" required></label>
  <label>City <input name="city" required></label>
  <button type="submit">Get weather</button>
</form>"#,
    );
    body.push_str("<h2>Recent saved forecasts</h2>");
    body.push_str(&saved_forecast_list(&recent));

    Ok(Html(page("Weather Forecast", &body)))
}

/// Form fields for the fetch endpoint
#[derive(Debug, Deserialize)]
pub struct GetWeatherForm {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub city: String,
}

/// POST /get_weather - fetch and display a city forecast
pub async fn get_weather(
    State(state): State<AppState>,
    Form(form): Form<GetWeatherForm>,
) -> AppResult<Html<String>> {
    let user_name = form.user_name.trim();
    let city = form.city.trim();

    if user_name.is_empty() || city.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter both your name and a city.".to_string(),
        ));
    }

    let forecasts = ForecastService::new(&state.config.openweather)
        .fetch_forecast(city)
        .await?;

    let log_service = WeatherLogService::new(state.db.clone());
    let user_recent = match log_service
        .user_forecasts(user_name, state.config.app.user_forecast_limit)
        .await
    {
        Ok(recent) => recent,
        Err(e) => {
            tracing::error!("Error fetching user recent forecasts: {}", e);
            Vec::new()
        }
    };

    let forecasts_json = serde_json::to_string(&forecasts)
        .map_err(|e| AppError::Internal(e.into()))?;

    let mut body = format!(
        "<h1>Forecast for {} (requested by {})</h1>",
        escape(city),
        escape(user_name)
    );
    body.push_str(&forecast_table(&forecasts));
    body.push_str(&format!(
        r#"<form method="post" action="/save_forecast">
  <input type="hidden" name="user_name" value="{}">
  <input type="hidden" name="city" value="{}">
  <input type="hidden" name="forecasts_data" value="{}">
  <button type="submit">Save this forecast</button>
</form>"#,
        escape(user_name),
        escape(city),
        escape(&forecasts_json)
    ));
    body.push_str(&format!("<h2>Recent saves by {}</h2>", escape(user_name)));
    body.push_str(&saved_forecast_list(&user_recent));

    Ok(Html(page("Forecast", &body)))
}

/// Form fields for the save endpoint
#[derive(Debug, Deserialize)]
pub struct SaveForecastForm {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub forecasts_data: String,
}

/// POST /save_forecast - persist a previously fetched forecast
pub async fn save_forecast(
    State(state): State<AppState>,
    Form(form): Form<SaveForecastForm>,
) -> AppResult<Redirect> {
    if form.user_name.trim().is_empty() || form.city.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "User name and city are required.".to_string(),
        ));
    }
    if form.forecasts_data.is_empty() {
        return Err(AppError::InvalidInput(
            "No forecast data to save. Fetch weather first.".to_string(),
        ));
    }

    let weather_data: serde_json::Value = serde_json::from_str(&form.forecasts_data)
        .map_err(|_| AppError::InvalidInput("Invalid forecast data format.".to_string()))?;

    let service = WeatherLogService::new(state.db.clone());
    service
        .save(&form.user_name, &form.city, weather_data)
        .await?;

    Ok(Redirect::to("/"))
}

/// GET /user_forecasts/:user_name - a user's saved forecasts
pub async fn user_forecasts(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> AppResult<Html<String>> {
    let user_name = user_name.trim().to_string();
    if user_name.is_empty() {
        return Err(AppError::InvalidInput("Invalid user name.".to_string()));
    }

    let service = WeatherLogService::new(state.db.clone());
    let forecasts = service
        .user_forecasts(&user_name, state.config.app.user_forecast_limit)
        .await?;

    let mut body = format!("<h1>Saved forecasts for {}</h1>", escape(&user_name));
    body.push_str(&saved_forecast_list(&forecasts));

    Ok(Html(page("User forecasts", &body)))
}

// ----------------------------------------------------------------------------
// Rendering helpers
// ----------------------------------------------------------------------------

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>{}</body></html>",
        escape(title),
        body
    )
}

fn forecast_table(forecasts: &[ForecastSample]) -> String {
    let mut rows = String::new();
    for sample in forecasts {
        let range = match &sample.daily_temps {
            Some(t) => format!("{:.1}°C / {:.1}°C", t.min, t.max),
            None => "-".to_string(),
        };
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&sample.dt_txt),
            escape(&forecast_summary(sample)),
            range
        ));
    }
    format!(
        "<table><tr><th>Time</th><th>Conditions</th><th>Min / Max</th></tr>{}</table>",
        rows
    )
}

/// Short human-readable summary for one forecast entry
fn forecast_summary(sample: &ForecastSample) -> String {
    let description = sample
        .weather
        .first()
        .map(|w| w.description.as_str())
        .unwrap_or("Data unavailable");
    format!("{:.1}°C, {}", sample.main.temp, description)
}

fn saved_forecast_list(logs: &[WeatherLog]) -> String {
    if logs.is_empty() {
        return "<p>No saved forecasts yet.</p>".to_string();
    }
    let items: String = logs
        .iter()
        .map(|log| {
            format!(
                "<li><a href=\"/user_forecasts/{}\">{}</a> - {} at {}</li>",
                escape(&log.user_name),
                escape(&log.user_name),
                escape(&log.city),
                log.timestamp.format("%Y-%m-%d %H:%M")
            )
        })
        .collect();
    format!("<ul>{}</ul>", items)
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
