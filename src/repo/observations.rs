use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::ensure_parent_dir;
use crate::domain::HourlyObservation;

/// CSV log of fetched hourly observations
/// (`Date,Hour,Irradiance,Temperature,Humidity`, empty cell = missing)
#[derive(Debug, Clone)]
pub struct ObservationLog {
    path: PathBuf,
}

impl ObservationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<Vec<HourlyObservation>> {
        if !self.exists() {
            anyhow::bail!("no observation log at {}", self.path.display());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<HourlyObservation>, _>>()
            .with_context(|| format!("malformed observation log {}", self.path.display()))?;

        debug!(path = %self.path.display(), rows = rows.len(), "loaded observation log");
        Ok(rows)
    }

    /// Replace the log with `rows`
    pub fn save(&self, rows: &[HourlyObservation]) -> Result<()> {
        ensure_parent_dir(&self.path)?;
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        debug!(path = %self.path.display(), rows = rows.len(), "wrote observation log");
        Ok(())
    }

    /// Union of the existing log and `rows` keyed by (date, hour); `rows`
    /// win on conflict. Returns the merged, chronologically sorted log.
    pub fn merge(&self, rows: &[HourlyObservation]) -> Result<Vec<HourlyObservation>> {
        let mut merged = BTreeMap::new();
        if self.exists() {
            for row in self.load()? {
                merged.insert(row.key(), row);
            }
        }
        for row in rows {
            merged.insert(row.key(), row.clone());
        }

        let merged: Vec<HourlyObservation> = merged.into_values().collect();
        self.save(&merged)?;
        Ok(merged)
    }
}
