use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::ensure_parent_dir;
use crate::domain::PredictionRecord;

/// CSV table of hourly predictions (`Hour,Predicted_Irradiance`)
#[derive(Debug, Clone)]
pub struct PredictionTable {
    path: PathBuf,
}

impl PredictionTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<PredictionRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        reader
            .deserialize()
            .collect::<Result<Vec<PredictionRecord>, _>>()
            .with_context(|| format!("malformed predictions file {}", self.path.display()))
    }

    pub fn save(&self, records: &[PredictionRecord]) -> Result<()> {
        ensure_parent_dir(&self.path)?;
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
