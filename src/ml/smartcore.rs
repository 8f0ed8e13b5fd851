//! SmartCore ML Model Wrapper
//!
//! Wraps SmartCore's RandomForestRegressor for the irradiance forecast.
//! The fitted forest is serde-serializable, so the whole wrapper (metadata,
//! parameters and trees) is persisted as one bincode blob.

use super::{calculate_metrics, ModelMetadata, ModelType, Regressor};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};

use ::smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use ::smartcore::linalg::basic::matrix::DenseMatrix;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Random forest training parameters
///
/// Defaults follow a conventional unrestricted forest: 100 fully grown trees,
/// every feature considered at each split, fixed seed for reproducibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}

impl ForestParams {
    fn to_smartcore(self, n_features: usize) -> RandomForestRegressorParameters {
        RandomForestRegressorParameters {
            max_depth: self.max_depth,
            min_samples_leaf: self.min_samples_leaf,
            min_samples_split: self.min_samples_split,
            n_trees: self.n_trees,
            m: Some(n_features),
            keep_samples: false, // Don't store training samples (saves memory)
            seed: self.seed,
        }
    }
}

/// SmartCore RandomForest Model Wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct SmartcoreRandomForest {
    pub metadata: ModelMetadata,
    pub params: ForestParams,
    model: Forest,
}

impl SmartcoreRandomForest {
    /// Train a new RandomForest model
    pub fn train(
        x: &[Vec<f64>],
        y: &[f64],
        params: ForestParams,
        feature_names: Vec<String>,
    ) -> Result<Self, ModelError> {
        if x.is_empty() || y.is_empty() {
            return Err(ModelError::EmptyDataset);
        }

        if x.len() != y.len() {
            return Err(ModelError::DimensionMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }

        let n_samples = x.len();
        let x_matrix = to_matrix(x, feature_names.len())?;

        let model = Forest::fit(&x_matrix, &y.to_vec(), params.to_smartcore(feature_names.len()))
            .map_err(|e| ModelError::Training(format!("RandomForest training failed: {e}")))?;

        // In-sample fit
        let predictions = model
            .predict(&x_matrix)
            .map_err(|e| ModelError::Prediction(format!("{e}")))?;
        let metrics = calculate_metrics(&predictions, y)?;

        let metadata = ModelMetadata {
            model_id: format!("smartcore_rf_{}", uuid::Uuid::new_v4()),
            model_type: ModelType::RandomForest,
            version: env!("CARGO_PKG_VERSION").to_string(),
            trained_at: chrono::Utc::now(),
            training_samples: n_samples,
            validation_metrics: metrics,
            feature_names,
        };

        Ok(Self {
            metadata,
            params,
            model,
        })
    }

    pub fn n_features(&self) -> usize {
        self.metadata.feature_names.len()
    }
}

impl Regressor for SmartcoreRandomForest {
    fn predict_rows(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let x = to_matrix(rows, self.n_features())?;
        self.model
            .predict(&x)
            .map_err(|e| ModelError::Prediction(format!("{e}")))
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

/// Row-major DenseMatrix from equally sized feature rows
fn to_matrix(rows: &[Vec<f64>], n_features: usize) -> Result<DenseMatrix<f64>, ModelError> {
    let mut flat = Vec::with_capacity(rows.len() * n_features);
    for row in rows {
        if row.len() != n_features {
            return Err(ModelError::DimensionMismatch {
                expected: n_features,
                actual: row.len(),
            });
        }
        flat.extend_from_slice(row);
    }
    Ok(DenseMatrix::new(rows.len(), n_features, flat, false))
}
