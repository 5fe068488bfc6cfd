//! Forecast fetching and daily aggregation
//!
//! `ForecastService` drives the upstream call and turns the flat 3-hour
//! sample list into a daily forecast; `aggregate_daily` is the pure
//! aggregation step and is what the unit tests exercise.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::OpenWeatherConfig;
use crate::error::{AppError, AppResult};
use crate::external::weather::{DailyTemps, ForecastSample, WeatherClient};

/// Orchestrates the upstream fetch and the daily aggregation
#[derive(Clone)]
pub struct ForecastService {
    client: Option<WeatherClient>,
}

impl ForecastService {
    /// Build from configuration; an empty API key leaves the client unset
    /// and every fetch fails with a handled configuration error.
    pub fn new(config: &OpenWeatherConfig) -> Self {
        let client = if config.api_key.is_empty() {
            None
        } else {
            Some(WeatherClient::with_base_url(
                config.api_key.clone(),
                config.api_endpoint.clone(),
                Duration::from_secs(config.timeout_seconds),
            ))
        };
        Self { client }
    }

    /// Fetch the daily forecast for a city.
    ///
    /// Returns up to 5 daily entries (or the raw-sample fallback) on
    /// success; every failure mode is a typed `AppError`, never a panic.
    pub async fn fetch_forecast(&self, city: &str) -> AppResult<Vec<ForecastSample>> {
        let city = city.trim();
        if city.is_empty() {
            return Err(AppError::InvalidInput("City name is required".to_string()));
        }

        let client = self.client.as_ref().ok_or_else(|| {
            AppError::Configuration("OpenWeather API key not configured".to_string())
        })?;

        let samples = client.fetch_forecast_samples(city).await?;
        if samples.is_empty() {
            return Err(AppError::NoData);
        }

        let forecasts = aggregate_daily(&samples);
        if forecasts.is_empty() {
            return Err(AppError::NoData);
        }

        Ok(forecasts)
    }
}

/// Derive a daily forecast from a flat list of 3-hour interval samples.
///
/// Samples are grouped by the calendar date in `dt_txt[..10]`; within each
/// date the sample whose hour is closest to 12:00 becomes the day's
/// representative (strict comparison, so ties keep the earlier sample), and
/// the representative is annotated with the date's min/max temperatures.
/// The first 5 dates in ascending order are kept.
pub fn aggregate_daily(samples: &[ForecastSample]) -> Vec<ForecastSample> {
    struct DayBucket {
        temps: Vec<f64>,
        representative: usize,
        midday_distance: i64,
    }

    // BTreeMap keys are the YYYY-MM-DD strings, so iteration order is
    // already chronological.
    let mut days: BTreeMap<&str, DayBucket> = BTreeMap::new();

    for (idx, sample) in samples.iter().enumerate() {
        let date = sample.dt_txt.get(..10).unwrap_or(&sample.dt_txt);
        let distance = midday_distance(&sample.dt_txt);

        let bucket = days.entry(date).or_insert_with(|| DayBucket {
            temps: Vec::new(),
            representative: idx,
            midday_distance: distance,
        });
        bucket.temps.push(sample.main.temp);
        if distance < bucket.midday_distance {
            bucket.representative = idx;
            bucket.midday_distance = distance;
        }
    }

    // Fewer than 5 distinct dates: drop the aggregated view and fall back
    // to the first 5 raw samples. Preserved from the original system as-is,
    // even though the aggregated view would still be usable here.
    if days.len() < 5 {
        return samples.iter().take(5).cloned().collect();
    }

    days.values()
        .take(5)
        .map(|bucket| {
            let mut entry = samples[bucket.representative].clone();
            let min = bucket.temps.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = bucket
                .temps
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            entry.daily_temps = Some(DailyTemps {
                min,
                max,
                current: entry.main.temp,
            });
            entry
        })
        .collect()
}

/// Distance of a sample's hour from 12:00.
///
/// A timestamp whose hour slice is absent or non-numeric counts as
/// maximally far from noon, so such a sample only represents its day when
/// it is the day's sole candidate.
fn midday_distance(dt_txt: &str) -> i64 {
    match dt_txt.get(11..13).and_then(|h| h.parse::<i64>().ok()) {
        Some(hour) => (hour - 12).abs(),
        None => i64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(dt_txt: &str, temp: f64) -> ForecastSample {
        ForecastSample {
            dt_txt: dt_txt.to_string(),
            main: crate::external::weather::SampleMain {
                temp,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Eight samples per date at hours 00, 03, ..., 21
    fn full_day(date: &str, base_temp: f64) -> Vec<ForecastSample> {
        (0..8)
            .map(|i| {
                let hour = i * 3;
                sample(
                    &format!("{} {:02}:00:00", date, hour),
                    base_temp + i as f64,
                )
            })
            .collect()
    }

    #[test]
    fn groups_five_dates_and_picks_midday_representative() {
        let dates = [
            "2024-06-01",
            "2024-06-02",
            "2024-06-03",
            "2024-06-04",
            "2024-06-05",
        ];
        let samples: Vec<_> = dates.iter().flat_map(|d| full_day(d, 10.0)).collect();

        let result = aggregate_daily(&samples);
        assert_eq!(result.len(), 5);
        for (entry, date) in result.iter().zip(dates) {
            assert_eq!(&entry.dt_txt, &format!("{} 12:00:00", date));
            assert!(entry.daily_temps.is_some());
        }
    }

    #[test]
    fn computes_min_and_max_per_date() {
        let mut samples = vec![
            sample("2024-06-01 09:00:00", 10.0),
            sample("2024-06-01 12:00:00", 22.0),
            sample("2024-06-01 15:00:00", 15.0),
        ];
        for date in ["2024-06-02", "2024-06-03", "2024-06-04", "2024-06-05"] {
            samples.extend(full_day(date, 5.0));
        }

        let result = aggregate_daily(&samples);
        let first = &result[0];
        let temps = first.daily_temps.as_ref().unwrap();
        assert_eq!(temps.min, 10.0);
        assert_eq!(temps.max, 22.0);
        assert_eq!(temps.current, 22.0);
    }

    #[test]
    fn nearest_hour_wins_when_noon_is_absent() {
        let mut samples = vec![
            sample("2024-06-01 06:00:00", 12.0),
            sample("2024-06-01 10:00:00", 14.0),
            sample("2024-06-01 17:00:00", 16.0),
        ];
        for date in ["2024-06-02", "2024-06-03", "2024-06-04", "2024-06-05"] {
            samples.extend(full_day(date, 5.0));
        }

        let result = aggregate_daily(&samples);
        assert_eq!(result[0].dt_txt, "2024-06-01 10:00:00");
    }

    #[test]
    fn equidistant_hours_keep_the_earlier_sample() {
        // 10:00 and 14:00 are both two hours from noon; the first seen wins
        let mut samples = vec![
            sample("2024-06-01 10:00:00", 11.0),
            sample("2024-06-01 14:00:00", 19.0),
        ];
        for date in ["2024-06-02", "2024-06-03", "2024-06-04", "2024-06-05"] {
            samples.extend(full_day(date, 5.0));
        }

        let result = aggregate_daily(&samples);
        assert_eq!(result[0].dt_txt, "2024-06-01 10:00:00");
    }

    #[test]
    fn falls_back_to_raw_samples_below_five_dates() {
        let samples: Vec<_> = ["2024-06-01", "2024-06-02", "2024-06-03"]
            .iter()
            .flat_map(|d| full_day(d, 10.0))
            .collect();

        let result = aggregate_daily(&samples);
        assert_eq!(result, samples[..5].to_vec());
        assert!(result.iter().all(|s| s.daily_temps.is_none()));
    }

    #[test]
    fn fallback_returns_everything_when_fewer_than_five_samples() {
        let samples = vec![
            sample("2024-06-01 09:00:00", 10.0),
            sample("2024-06-02 09:00:00", 11.0),
        ];
        let result = aggregate_daily(&samples);
        assert_eq!(result, samples);
    }

    #[test]
    fn is_deterministic() {
        let samples: Vec<_> = [
            "2024-06-01",
            "2024-06-02",
            "2024-06-03",
            "2024-06-04",
            "2024-06-05",
            "2024-06-06",
        ]
        .iter()
        .flat_map(|d| full_day(d, 8.0))
        .collect();

        let first = aggregate_daily(&samples);
        let second = aggregate_daily(&samples);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn malformed_timestamps_do_not_panic() {
        let samples = vec![
            sample("", 10.0),
            sample("2024-06-01", 11.0),
            sample("2024-06-01 xx:00:00", 12.0),
            sample("garbage", 13.0),
        ];
        let result = aggregate_daily(&samples);
        // Three distinct date keys, so the raw fallback applies
        assert_eq!(result, samples);
    }

    #[test]
    fn unparsable_hour_never_displaces_a_parsed_representative() {
        let mut samples = vec![
            sample("2024-06-01 21:00:00", 10.0),
            sample("2024-06-01 zz:00:00", 11.0),
        ];
        for date in ["2024-06-02", "2024-06-03", "2024-06-04", "2024-06-05"] {
            samples.extend(full_day(date, 5.0));
        }

        let result = aggregate_daily(&samples);
        assert_eq!(result[0].dt_txt, "2024-06-01 21:00:00");
    }
}
