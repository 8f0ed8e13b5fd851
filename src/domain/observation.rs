use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One hour of measured weather at the configured location.
///
/// Column names match the observation log header
/// (`Date,Hour,Irradiance,Temperature,Humidity`). Measurements the provider
/// could not supply are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyObservation {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Hour of day (0-23, UTC)
    #[serde(rename = "Hour")]
    pub hour: u32,
    /// All-sky surface shortwave irradiance (W/m²)
    #[serde(rename = "Irradiance")]
    pub irradiance_w_per_m2: Option<f64>,
    /// Air temperature at 2 m (Celsius)
    #[serde(rename = "Temperature")]
    pub temperature_c: Option<f64>,
    /// Relative humidity at 2 m (%)
    #[serde(rename = "Humidity")]
    pub humidity_percent: Option<f64>,
}

impl HourlyObservation {
    pub fn day_of_year(&self) -> u32 {
        self.date.ordinal()
    }

    /// Sort/merge key
    pub fn key(&self) -> (NaiveDate, u32) {
        (self.date, self.hour)
    }
}
