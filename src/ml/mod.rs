//! Machine Learning Module
//!
//! Irradiance regression for the day-ahead forecast:
//! - Training dataset assembly from the observation log
//! - SmartCore random forest wrapper with bincode persistence
//! - In-sample fit metrics attached to every trained model

use serde::{Deserialize, Serialize};
use strum::Display;

pub mod models;
pub mod smartcore;
pub mod training;

pub use models::Regressor;
pub use self::smartcore::{ForestParams, SmartcoreRandomForest};
pub use training::{calculate_metrics, TrainingDataset};

/// ML Model Type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ModelType {
    RandomForest,
}

/// ML Model Metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_id: String,
    pub model_type: ModelType,
    pub version: String,
    pub trained_at: chrono::DateTime<chrono::Utc>,
    pub training_samples: usize,
    pub validation_metrics: ValidationMetrics,
    pub feature_names: Vec<String>,
}

/// Validation Metrics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValidationMetrics {
    /// Mean absolute error, W/m²
    pub mae: f64,
    /// Root mean square error, W/m²
    pub rmse: f64,
    /// Coefficient of determination; 0 when the targets are constant
    pub r2: f64,
}

impl ValidationMetrics {
    pub fn new(mae: f64, rmse: f64, r2: f64) -> Self {
        Self { mae, rmse, r2 }
    }
}

impl std::fmt::Display for ValidationMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MAE {:.1} W/m², RMSE {:.1} W/m², R² {:.3}",
            self.mae, self.rmse, self.r2
        )
    }
}
