use serde::{Deserialize, Serialize};

/// Names of the regression inputs, in column order
pub const FEATURE_NAMES: [&str; 4] = ["hour", "day_of_year", "temperature_c", "humidity_percent"];

/// Weather expected for one hour of the target day, before the seasonal
/// feature is attached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyWeather {
    pub hour: u32,
    pub temperature_c: f64,
    pub humidity_percent: f64,
}

/// Feature vector consumed by the forecaster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherFeature {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Day of year (1-366)
    pub day_of_year: u32,
    pub temperature_c: f64,
    pub humidity_percent: f64,
}

impl WeatherFeature {
    pub fn from_weather(weather: &HourlyWeather, day_of_year: u32) -> Self {
        Self {
            hour: weather.hour,
            day_of_year,
            temperature_c: weather.temperature_c,
            humidity_percent: weather.humidity_percent,
        }
    }

    /// Model input row, ordered as [`FEATURE_NAMES`]
    pub fn to_row(&self) -> Vec<f64> {
        vec![
            self.hour as f64,
            self.day_of_year as f64,
            self.temperature_c,
            self.humidity_percent,
        ]
    }
}

/// Predicted irradiance for one hour of the target day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "Hour")]
    pub hour: u32,
    /// W/m²
    #[serde(rename = "Predicted_Irradiance")]
    pub predicted_irradiance_w_per_m2: f64,
}

impl PredictionRecord {
    pub fn new(hour: u32, predicted_irradiance_w_per_m2: f64) -> Self {
        Self {
            hour,
            predicted_irradiance_w_per_m2,
        }
    }
}
