// SPDX-License-Identifier: MIT
//! Weather forecast response model and generation.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Fixed vocabulary of forecast summaries.
pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Inclusive lower bound of generated temperatures (°C).
pub const TEMPERATURE_MIN_C: i32 = -20;
/// Exclusive upper bound of generated temperatures (°C).
pub const TEMPERATURE_MAX_C: i32 = 55;

/// Number of days covered by one forecast response.
pub const FORECAST_DAYS: i64 = 5;

/// A single day's forecast.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    /// Timestamp the forecast applies to (ISO-8601 on the wire).
    pub date: DateTime<Utc>,
    /// Temperature in degrees Celsius, within `[-20, 55)`.
    pub temperature_c: i32,
    /// Summary word from [`SUMMARIES`], if any.
    pub summary: Option<String>,
}

impl WeatherForecast {
    /// Temperature in degrees Fahrenheit, derived from the Celsius value.
    pub fn temperature_f(&self) -> i32 {
        32 + (f64::from(self.temperature_c) / 0.5556) as i32
    }
}

/// Generate the forecast for the next [`FORECAST_DAYS`] days after `from`.
///
/// Each record combines a date offset of 1..=N days, a uniformly random
/// temperature in `[TEMPERATURE_MIN_C, TEMPERATURE_MAX_C)` and a uniformly
/// random summary word. Records are ordered by ascending date.
pub fn next_days(from: DateTime<Utc>) -> Vec<WeatherForecast> {
    let mut rng = rand::thread_rng();
    (1..=FORECAST_DAYS)
        .map(|offset| WeatherForecast {
            date: from + Duration::days(offset),
            temperature_c: rng.gen_range(TEMPERATURE_MIN_C..TEMPERATURE_MAX_C),
            summary: SUMMARIES.choose(&mut rng).map(|s| (*s).to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_has_five_days_in_ascending_order() {
        let now = Utc::now();
        let forecast = next_days(now);
        assert_eq!(forecast.len(), 5);
        for (i, record) in forecast.iter().enumerate() {
            let offset = i as i64 + 1;
            assert_eq!(record.date, now + Duration::days(offset));
            assert!(record.date > now);
        }
        for pair in forecast.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn temperatures_stay_within_range() {
        let now = Utc::now();
        for _ in 0..200 {
            for record in next_days(now) {
                assert!(record.temperature_c >= TEMPERATURE_MIN_C);
                assert!(record.temperature_c < TEMPERATURE_MAX_C);
            }
        }
    }

    #[test]
    fn summaries_come_from_the_vocabulary() {
        for record in next_days(Utc::now()) {
            let summary = record.summary.expect("generation always picks a summary");
            assert!(SUMMARIES.contains(&summary.as_str()));
        }
    }

    #[test]
    fn fahrenheit_derivation_truncates_toward_zero() {
        let record = |temperature_c| WeatherForecast {
            date: Utc::now(),
            temperature_c,
            summary: None,
        };
        assert_eq!(record(0).temperature_f(), 32);
        assert_eq!(record(54).temperature_f(), 32 + 97);
        assert_eq!(record(-20).temperature_f(), 32 - 35);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(WeatherForecast {
            date: Utc::now(),
            temperature_c: 21,
            summary: Some("Mild".to_string()),
        })
        .expect("serializable");
        assert!(json["date"].is_string());
        assert_eq!(json["temperatureC"], 21);
        assert_eq!(json["summary"], "Mild");
    }
}
