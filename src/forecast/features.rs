//! Feature engineering for the day-ahead forecast
//!
//! Tomorrow's weather is not fetched; each hour reuses today's measured
//! temperature and humidity, with configured fallbacks for hours the
//! provider has not published yet.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{HourlyObservation, HourlyWeather, WeatherFeature};

/// Values used when today has no measurement for an hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherFallback {
    pub temperature_c: f64,
    pub humidity_percent: f64,
}

impl Default for WeatherFallback {
    fn default() -> Self {
        Self {
            temperature_c: 25.0,
            humidity_percent: 60.0,
        }
    }
}

/// Day of year (1-366) used as the seasonal feature
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Build the 24 weather rows for the day after `today`
pub fn tomorrow_weather(
    observations: &[HourlyObservation],
    today: NaiveDate,
    fallback: WeatherFallback,
) -> Vec<HourlyWeather> {
    (0..24)
        .map(|hour| {
            let row = observations
                .iter()
                .find(|o| o.date == today && o.hour == hour);
            HourlyWeather {
                hour,
                temperature_c: row
                    .and_then(|o| o.temperature_c)
                    .unwrap_or(fallback.temperature_c),
                humidity_percent: row
                    .and_then(|o| o.humidity_percent)
                    .unwrap_or(fallback.humidity_percent),
            }
        })
        .collect()
}

/// Attach the target date's day-of-year to every weather row
pub fn attach_day_of_year(weather: &[HourlyWeather], target_date: NaiveDate) -> Vec<WeatherFeature> {
    let doy = day_of_year(target_date);
    weather
        .iter()
        .map(|w| WeatherFeature::from_weather(w, doy))
        .collect()
}

/// Measured irradiance for `date`, ordered by hour, skipping missing values
pub fn actual_irradiance(observations: &[HourlyObservation], date: NaiveDate) -> Vec<(u32, f64)> {
    let mut points: Vec<(u32, f64)> = observations
        .iter()
        .filter(|o| o.date == date)
        .filter_map(|o| o.irradiance_w_per_m2.map(|v| (o.hour, v)))
        .collect();
    points.sort_by_key(|(hour, _)| *hour);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(date: NaiveDate, hour: u32, t: Option<f64>, h: Option<f64>) -> HourlyObservation {
        HourlyObservation {
            date,
            hour,
            irradiance_w_per_m2: Some(hour as f64 * 10.0),
            temperature_c: t,
            humidity_percent: h,
        }
    }

    #[rstest]
    #[case(date(2023, 1, 1), 1)]
    #[case(date(2023, 12, 31), 365)]
    #[case(date(2024, 12, 31), 366)]
    #[case(date(2024, 6, 21), 173)]
    fn test_day_of_year(#[case] d: NaiveDate, #[case] expected: u32) {
        assert_eq!(day_of_year(d), expected);
    }

    #[test]
    fn test_tomorrow_weather_uses_today_and_fallback() {
        let today = date(2024, 5, 10);
        let yesterday = date(2024, 5, 9);
        let observations = vec![
            obs(yesterday, 3, Some(5.0), Some(90.0)),
            obs(today, 3, Some(12.0), Some(70.0)),
            obs(today, 4, None, Some(65.0)),
        ];

        let weather = tomorrow_weather(&observations, today, WeatherFallback::default());

        assert_eq!(weather.len(), 24);
        assert!(weather.iter().enumerate().all(|(i, w)| w.hour == i as u32));
        assert_eq!(weather[3].temperature_c, 12.0);
        assert_eq!(weather[3].humidity_percent, 70.0);
        // Missing temperature falls back, humidity is kept
        assert_eq!(weather[4].temperature_c, 25.0);
        assert_eq!(weather[4].humidity_percent, 65.0);
        // No row at all
        assert_eq!(weather[0].temperature_c, 25.0);
        assert_eq!(weather[0].humidity_percent, 60.0);
    }

    #[test]
    fn test_attach_day_of_year() {
        let weather = tomorrow_weather(&[], date(2024, 2, 28), WeatherFallback::default());
        let features = attach_day_of_year(&weather, date(2024, 2, 29));

        assert_eq!(features.len(), 24);
        assert!(features.iter().all(|f| f.day_of_year == 60));
    }

    #[test]
    fn test_actual_irradiance_sorted_by_hour() {
        let today = date(2024, 5, 10);
        let observations = vec![
            obs(today, 5, None, None),
            obs(today, 2, None, None),
            obs(date(2024, 5, 9), 1, None, None),
        ];

        let points = actual_irradiance(&observations, today);
        assert_eq!(points, vec![(2, 20.0), (5, 50.0)]);
    }
}
