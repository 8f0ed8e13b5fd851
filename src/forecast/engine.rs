use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use super::attach_day_of_year;
use crate::domain::{HourlyObservation, HourlyWeather, PredictionRecord, FEATURE_NAMES};
use crate::error::ModelError;
use crate::ml::{ForestParams, Regressor, SmartcoreRandomForest, TrainingDataset};
use crate::repo::{ModelStore, ObservationLog};

/// Day-ahead irradiance forecaster holding one trained regressor
pub struct Forecaster {
    model: Box<dyn Regressor>,
}

impl Forecaster {
    pub fn new(model: Box<dyn Regressor>) -> Self {
        Self { model }
    }

    /// Fit (hour, day-of-year, temperature, humidity) -> irradiance on every
    /// complete historical row
    pub fn train(
        observations: &[HourlyObservation],
        params: ForestParams,
    ) -> Result<SmartcoreRandomForest, ModelError> {
        let dataset = TrainingDataset::from_observations(observations);
        if dataset.dropped_rows > 0 {
            warn!(
                dropped = dataset.dropped_rows,
                "dropped observations with missing values before training"
            );
        }
        if dataset.is_empty() {
            return Err(ModelError::EmptyDataset);
        }

        let feature_names = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        let model =
            SmartcoreRandomForest::train(&dataset.features, &dataset.targets, params, feature_names)?;

        info!(
            model_id = %model.metadata.model_id,
            samples = model.metadata.training_samples,
            fit = %model.metadata.validation_metrics,
            "trained irradiance model"
        );
        Ok(model)
    }

    /// Load the persisted model, or train one from the observation log and
    /// persist it. Absence of the model file is the only retraining trigger.
    pub fn load_or_train(
        store: &ModelStore,
        log: &ObservationLog,
        params: ForestParams,
    ) -> Result<SmartcoreRandomForest> {
        if store.exists() {
            let model = store.load()?;
            info!(path = %store.path().display(), model_id = %model.metadata.model_id, "loaded irradiance model");
            return Ok(model);
        }

        info!(path = %store.path().display(), "no saved model, training from observation log");
        let observations = log.load()?;
        let model = Self::train(&observations, params).context("failed to train irradiance model")?;
        store.save(&model)?;
        Ok(model)
    }

    /// Predict irradiance for each supplied hour of `target_date`.
    ///
    /// Inputs are not range-checked; the model extrapolates. Outputs are
    /// floored at 0 W/m², absorbing the rounding residue forest averaging
    /// leaves on dark hours.
    pub fn predict(
        &self,
        weather: &[HourlyWeather],
        target_date: NaiveDate,
    ) -> Result<Vec<PredictionRecord>, ModelError> {
        let features = attach_day_of_year(weather, target_date);
        let rows: Vec<Vec<f64>> = features.iter().map(|f| f.to_row()).collect();
        let values = self.model.predict_rows(&rows)?;

        if values.len() != features.len() {
            return Err(ModelError::DimensionMismatch {
                expected: features.len(),
                actual: values.len(),
            });
        }

        Ok(features
            .iter()
            .zip(values)
            .map(|(f, v)| PredictionRecord::new(f.hour, v.max(0.0)))
            .collect())
    }
}
