//! Request-driven planning run: fetch -> log -> model -> predict -> chart -> schedule

pub mod scheduler;

pub use scheduler::{schedule, ThresholdScheduler};

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::config::Config;
use crate::domain::{LoadSchedule, PredictionRecord};
use crate::error::FetchError;
use crate::forecast::{
    actual_irradiance, tomorrow_weather, Forecaster, GeoLocation, NasaPowerClient, WeatherProvider,
};
use crate::ml::ModelMetadata;
use crate::repo::{ModelStore, ObservationLog, PredictionTable};
use crate::report::write_irradiance_chart;

/// Inputs of one planning run
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest {
    pub location: GeoLocation,
    /// UTC date treated as "today"; the forecast targets the day after
    pub today: NaiveDate,
    pub threshold_w_per_m2: f64,
}

impl PlanRequest {
    pub fn from_config(cfg: &Config, today: NaiveDate) -> Self {
        Self {
            location: cfg.location.geo(),
            today,
            threshold_w_per_m2: cfg.scheduler.threshold_w_per_m2,
        }
    }
}

/// Everything a planning run produced
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub today: NaiveDate,
    pub target_date: NaiveDate,
    pub observations_fetched: usize,
    pub today_actual: Vec<(u32, f64)>,
    pub predictions: Vec<PredictionRecord>,
    pub schedule: LoadSchedule,
    pub model: ModelMetadata,
    pub chart_path: PathBuf,
    pub predictions_path: PathBuf,
}

pub struct Planner {
    cfg: Config,
    provider: Box<dyn WeatherProvider>,
    log: ObservationLog,
    store: ModelStore,
    predictions: PredictionTable,
}

impl Planner {
    pub fn new(cfg: Config, provider: Box<dyn WeatherProvider>) -> Self {
        let log = ObservationLog::new(&cfg.storage.log_path);
        let store = ModelStore::new(&cfg.storage.model_path);
        let predictions = PredictionTable::new(&cfg.storage.predictions_path);
        Self {
            cfg,
            provider,
            log,
            store,
            predictions,
        }
    }

    /// Planner backed by the NASA POWER API
    pub fn from_config(cfg: Config) -> Result<Self> {
        let client = NasaPowerClient::new(
            cfg.nasa_power.base_url.clone(),
            cfg.nasa_power.community.clone(),
            cfg.nasa_power.timeout(),
        )?;
        Ok(Self::new(cfg, Box::new(client)))
    }

    #[instrument(skip(self), fields(today = %request.today))]
    pub async fn plan(&self, request: &PlanRequest) -> Result<PlanOutcome> {
        let today = request.today;
        let start = today
            .checked_sub_days(Days::new(self.cfg.forecast.history_days.into()))
            .context("history window start out of range")?;
        let target_date = today
            .checked_add_days(Days::new(1))
            .context("target date out of range")?;

        let observations = self
            .provider
            .fetch_hourly(&request.location, start, today)
            .await?;
        if observations.is_empty() {
            return Err(FetchError::DataUnavailable("No historic data available".to_string()).into());
        }
        info!(rows = observations.len(), %start, end = %today, "fetched historic weather data");

        self.log.merge(&observations)?;

        let model = Forecaster::load_or_train(&self.store, &self.log, self.cfg.forecast.forest_params())?;
        let metadata = model.metadata.clone();
        let forecaster = Forecaster::new(Box::new(model));

        let weather = tomorrow_weather(&observations, today, self.cfg.forecast.fallback());
        let predictions = forecaster.predict(&weather, target_date)?;
        self.predictions.save(&predictions)?;

        let today_actual = actual_irradiance(&observations, today);
        write_irradiance_chart(&self.cfg.storage.chart_path, &today_actual, &predictions)?;

        let schedule = ThresholdScheduler::new(request.threshold_w_per_m2).plan(target_date, &predictions);
        info!(hours = %schedule, threshold = request.threshold_w_per_m2, "planning run complete");

        Ok(PlanOutcome {
            today,
            target_date,
            observations_fetched: observations.len(),
            today_actual,
            predictions,
            schedule,
            model: metadata,
            chart_path: self.cfg.storage.chart_path.clone(),
            predictions_path: self.predictions.path().to_path_buf(),
        })
    }

    /// Train from the full observation log and overwrite the saved model
    pub fn retrain(&self) -> Result<ModelMetadata> {
        let observations = self.log.load()?;
        let model = Forecaster::train(&observations, self.cfg.forecast.forest_params())
            .context("failed to train irradiance model")?;
        self.store.save(&model)?;
        Ok(model.metadata)
    }
}
