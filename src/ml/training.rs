//! ML Model Training Pipeline
//!
//! Turns logged hourly observations into a regression dataset and scores fits.

use super::ValidationMetrics;
use crate::domain::{HourlyObservation, WeatherFeature};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Training Dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingDataset {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
    /// Observations skipped because a measurement was missing
    pub dropped_rows: usize,
}

impl TrainingDataset {
    /// Build (hour, day-of-year, temperature, humidity) -> irradiance rows.
    ///
    /// Rows with any missing measurement are dropped.
    pub fn from_observations(observations: &[HourlyObservation]) -> Self {
        let mut features = Vec::with_capacity(observations.len());
        let mut targets = Vec::with_capacity(observations.len());
        let mut dropped_rows = 0;

        for obs in observations {
            match (obs.irradiance_w_per_m2, obs.temperature_c, obs.humidity_percent) {
                (Some(irradiance), Some(temperature_c), Some(humidity_percent)) => {
                    let feature = WeatherFeature {
                        hour: obs.hour,
                        day_of_year: obs.day_of_year(),
                        temperature_c,
                        humidity_percent,
                    };
                    features.push(feature.to_row());
                    targets.push(irradiance);
                }
                _ => dropped_rows += 1,
            }
        }

        Self {
            features,
            targets,
            dropped_rows,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Calculate fit metrics of `predictions` against `targets`
pub fn calculate_metrics(predictions: &[f64], targets: &[f64]) -> Result<ValidationMetrics, ModelError> {
    if predictions.len() != targets.len() {
        return Err(ModelError::DimensionMismatch {
            expected: targets.len(),
            actual: predictions.len(),
        });
    }

    if predictions.is_empty() {
        return Err(ModelError::EmptyDataset);
    }

    let n = predictions.len() as f64;

    let mae: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (p - t).abs())
        .sum::<f64>()
        / n;

    let mse: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (p - t).powi(2))
        .sum::<f64>()
        / n;
    let rmse = mse.sqrt();

    let mean_target: f64 = targets.iter().sum::<f64>() / n;
    let ss_tot: f64 = targets.iter().map(|t| (t - mean_target).powi(2)).sum();
    let ss_res: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (t - p).powi(2))
        .sum();

    let r2 = if ss_tot.abs() < 1e-10 {
        0.0
    } else {
        1.0 - (ss_res / ss_tot)
    };

    Ok(ValidationMetrics::new(mae, rmse, r2))
}
