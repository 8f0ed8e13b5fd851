//! Regressor abstraction used by the forecaster

use super::{ModelMetadata, ModelType};
use crate::error::ModelError;

/// Trait for trained regression models
pub trait Regressor: Send + Sync {
    /// Predict one value per input row
    fn predict_rows(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError>;

    /// Get model metadata
    fn metadata(&self) -> &ModelMetadata;

    /// Get model type
    fn model_type(&self) -> ModelType {
        self.metadata().model_type
    }
}
