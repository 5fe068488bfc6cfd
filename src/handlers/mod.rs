//! HTTP handlers

pub mod api;
pub mod health;
pub mod pages;

pub use api::{api_forecasts, api_recent, api_users, api_weather};
pub use health::healthz;
pub use pages::{get_weather, index, save_forecast, user_forecasts};
