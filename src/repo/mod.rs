//! Flat-file persistence: observation log, predictions table and model blob

pub mod models;
pub mod observations;
pub mod predictions;

pub use models::ModelStore;
pub use observations::ObservationLog;
pub use predictions::PredictionTable;

use anyhow::{Context, Result};
use std::path::Path;

/// Create the parent directory of `path` if it has one
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display())),
        _ => Ok(()),
    }
}
