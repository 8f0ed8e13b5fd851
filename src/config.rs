use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

use crate::forecast::{GeoLocation, WeatherFallback};
use crate::ml::ForestParams;

pub const CONFIG_FILE: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "SOLAR__";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub location: LocationConfig,
    pub nasa_power: NasaPowerConfig,
    pub storage: StorageConfig,
    #[validate(nested)]
    pub forecast: ForecastConfig,
    #[validate(nested)]
    pub scheduler: SchedulerConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationConfig {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        // New Delhi
        Self {
            latitude: 28.6139,
            longitude: 77.2090,
        }
    }
}

impl LocationConfig {
    pub fn geo(&self) -> GeoLocation {
        GeoLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NasaPowerConfig {
    pub base_url: String,
    pub community: String,
    pub http_timeout_seconds: u64,
}

impl Default for NasaPowerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://power.larc.nasa.gov".to_string(),
            community: "RE".to_string(),
            http_timeout_seconds: 30,
        }
    }
}

impl NasaPowerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub log_path: PathBuf,
    pub model_path: PathBuf,
    pub predictions_path: PathBuf,
    pub chart_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("data/energy_logs.csv"),
            model_path: PathBuf::from("models/energy_predictor.bin"),
            predictions_path: PathBuf::from("output/predictions.csv"),
            chart_path: PathBuf::from("output/irradiance.svg"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForecastConfig {
    /// Days of history fetched before today
    #[validate(range(min = 1, max = 30))]
    pub history_days: u32,
    #[validate(range(min = 1))]
    pub n_trees: usize,
    pub max_depth: Option<u16>,
    pub seed: u64,
    pub fallback_temperature_c: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub fallback_humidity_percent: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        let forest = ForestParams::default();
        let fallback = WeatherFallback::default();
        Self {
            history_days: 1,
            n_trees: forest.n_trees,
            max_depth: forest.max_depth,
            seed: forest.seed,
            fallback_temperature_c: fallback.temperature_c,
            fallback_humidity_percent: fallback.humidity_percent,
        }
    }
}

impl ForecastConfig {
    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.n_trees,
            max_depth: self.max_depth,
            seed: self.seed,
            ..ForestParams::default()
        }
    }

    pub fn fallback(&self) -> WeatherFallback {
        WeatherFallback {
            temperature_c: self.fallback_temperature_c,
            humidity_percent: self.fallback_humidity_percent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SchedulerConfig {
    /// Irradiance at or above which an hour is recommended (W/m²)
    #[validate(range(min = 0.0, max = 1000.0))]
    pub threshold_w_per_m2: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            threshold_w_per_m2: 200.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Emit JSON log lines instead of human-readable ones
    pub json: bool,
}

impl Config {
    /// Built-in defaults, then `config/default.toml`, then `SOLAR__*` env vars
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply command-line overrides and re-check every range
    pub fn with_overrides(
        mut self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        threshold_w_per_m2: Option<f64>,
    ) -> Result<Self> {
        if let Some(latitude) = latitude {
            self.location.latitude = latitude;
        }
        if let Some(longitude) = longitude {
            self.location.longitude = longitude;
        }
        if let Some(threshold) = threshold_w_per_m2 {
            self.scheduler.threshold_w_per_m2 = threshold;
        }
        self.validate()?;
        Ok(self)
    }
}
