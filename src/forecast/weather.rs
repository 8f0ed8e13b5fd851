//! Historical weather integration (NASA POWER hourly point API)
//!
//! Provides the measured hourly irradiance, temperature and humidity that
//! the forecaster is trained on.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::domain::HourlyObservation;
use crate::error::FetchError;

/// All-sky surface shortwave downward irradiance (W/m²)
pub const PARAM_IRRADIANCE: &str = "ALLSKY_SFC_SW_DWN";
/// Temperature at 2 m (C)
pub const PARAM_TEMPERATURE: &str = "T2M";
/// Relative humidity at 2 m (%)
pub const PARAM_HUMIDITY: &str = "RH2M";

/// POWER marks missing data with -999
const FILL_VALUE_CEILING: f64 = -990.0;

/// Geographic location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Hourly observations for every hour of `start..=end` (UTC dates)
    async fn fetch_hourly(
        &self,
        location: &GeoLocation,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HourlyObservation>, FetchError>;
}

/// NASA POWER API client
#[derive(Clone)]
pub struct NasaPowerClient {
    client: Client,
    base_url: String,
    community: String,
}

impl NasaPowerClient {
    pub fn new(base_url: String, community: String, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("solar-load-planner/", env!("CARGO_PKG_VERSION"))),
        );
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base_url,
            community,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/temporal/hourly/point",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl WeatherProvider for NasaPowerClient {
    async fn fetch_hourly(
        &self,
        location: &GeoLocation,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HourlyObservation>, FetchError> {
        let url = self.endpoint();
        let query = [
            (
                "parameters",
                format!("{PARAM_IRRADIANCE},{PARAM_TEMPERATURE},{PARAM_HUMIDITY}"),
            ),
            ("community", self.community.clone()),
            ("longitude", format!("{:.4}", location.longitude)),
            ("latitude", format!("{:.4}", location.latitude)),
            ("start", start.format("%Y%m%d").to_string()),
            ("end", end.format("%Y%m%d").to_string()),
            ("format", "JSON".to_string()),
            ("time-standard", "UTC".to_string()),
        ];

        debug!(%url, %start, %end, "fetching hourly observations from NASA POWER");

        let response = self.client.get(&url).query(&query[..]).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(%status, "NASA POWER API returned error status");
            let snippet: String = body.chars().take(200).collect();
            return Err(FetchError::DataUnavailable(format!("HTTP {status}: {snippet}")));
        }

        let observations = parse_hourly(&body)?;

        info!(
            rows = observations.len(),
            latitude = location.latitude,
            longitude = location.longitude,
            "fetched hourly observations from NASA POWER"
        );

        Ok(observations)
    }
}

/// Parse a POWER hourly JSON body into observations ordered by (date, hour)
pub fn parse_hourly(body: &str) -> Result<Vec<HourlyObservation>, FetchError> {
    let response: PowerResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::UnexpectedResponse(format!("invalid POWER JSON: {e}")))?;
    let parameters = response.properties.parameter;

    let series = |name: &str| -> Result<&BTreeMap<String, f64>, FetchError> {
        parameters
            .get(name)
            .ok_or_else(|| FetchError::UnexpectedResponse(format!("missing parameter {name}")))
    };
    let irradiance = series(PARAM_IRRADIANCE)?;
    let temperature = series(PARAM_TEMPERATURE)?;
    let humidity = series(PARAM_HUMIDITY)?;

    let timestamps: BTreeSet<&String> = irradiance
        .keys()
        .chain(temperature.keys())
        .chain(humidity.keys())
        .collect();

    if timestamps.is_empty() {
        return Err(FetchError::DataUnavailable(
            "no hourly values returned".to_string(),
        ));
    }

    timestamps
        .into_iter()
        .map(|key| {
            let (date, hour) = parse_timestamp(key)?;
            let value = |s: &BTreeMap<String, f64>| s.get(key).copied().filter(|v| *v > FILL_VALUE_CEILING);
            Ok(HourlyObservation {
                date,
                hour,
                irradiance_w_per_m2: value(irradiance),
                temperature_c: value(temperature),
                humidity_percent: value(humidity),
            })
        })
        .collect()
}

/// `YYYYMMDDHH` -> (date, hour)
fn parse_timestamp(key: &str) -> Result<(NaiveDate, u32), FetchError> {
    let bad = || FetchError::UnexpectedResponse(format!("bad timestamp key {key:?}"));

    if key.len() != 10 || !key.is_ascii() {
        return Err(bad());
    }
    let date = NaiveDate::parse_from_str(&key[..8], "%Y%m%d").map_err(|_| bad())?;
    let hour: u32 = key[8..].parse().map_err(|_| bad())?;
    if hour > 23 {
        return Err(bad());
    }
    Ok((date, hour))
}

// POWER API response structures
#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: HashMap<String, BTreeMap<String, f64>>,
}
