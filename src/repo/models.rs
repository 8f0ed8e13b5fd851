use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use super::ensure_parent_dir;
use crate::error::ModelError;
use crate::ml::SmartcoreRandomForest;

/// Persisted irradiance model at a fixed path (bincode blob)
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<SmartcoreRandomForest> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("failed to read model {}", self.path.display()))?;
        let model = bincode::deserialize(&bytes)
            .map_err(|e| ModelError::Persistence(format!("failed to deserialize model: {e}")))?;
        Ok(model)
    }

    pub fn save(&self, model: &SmartcoreRandomForest) -> Result<()> {
        let bytes = bincode::serialize(model)
            .map_err(|e| ModelError::Persistence(format!("failed to serialize model: {e}")))?;
        ensure_parent_dir(&self.path)?;
        std::fs::write(&self.path, bytes)
            .with_context(|| format!("failed to write model {}", self.path.display()))?;

        info!(path = %self.path.display(), model_id = %model.metadata.model_id, "saved irradiance model");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::{ForestParams, Regressor};

    #[test]
    fn test_save_then_load_predicts_identically() {
        let x: Vec<Vec<f64>> = (0..24).map(|h| vec![h as f64, (h % 5) as f64]).collect();
        let y: Vec<f64> = (0..24).map(|h| (h as f64 - 12.0).abs() * 10.0).collect();
        let params = ForestParams {
            n_trees: 8,
            ..ForestParams::default()
        };
        let model =
            SmartcoreRandomForest::train(&x, &y, params, vec!["a".into(), "b".into()]).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("models/energy_predictor.bin"));
        assert!(!store.exists());

        store.save(&model).unwrap();
        assert!(store.exists());

        let restored = store.load().unwrap();
        assert_eq!(restored.metadata.model_id, model.metadata.model_id);
        assert_eq!(restored.params, params);
        assert_eq!(restored.predict_rows(&x).unwrap(), model.predict_rows(&x).unwrap());
    }

    #[test]
    fn test_load_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        std::fs::write(&path, b"not a model").unwrap();

        assert!(ModelStore::new(path).load().is_err());
    }
}
