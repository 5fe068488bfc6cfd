//! Business logic services for the weather forecast service

pub mod forecast;
pub mod weather_log;

pub use forecast::ForecastService;
pub use weather_log::WeatherLogService;
