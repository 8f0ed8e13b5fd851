use chrono::NaiveDate;
use itertools::Itertools;
use tracing::debug;

use crate::domain::{LoadSchedule, PredictionRecord};

/// Hours whose predicted irradiance is at or above `threshold_w_per_m2`,
/// ascending and without duplicates. Never fails; no qualifying hour yields
/// an empty vector.
pub fn schedule(predictions: &[PredictionRecord], threshold_w_per_m2: f64) -> Vec<u32> {
    predictions
        .iter()
        .filter(|p| p.predicted_irradiance_w_per_m2 >= threshold_w_per_m2)
        .map(|p| p.hour)
        .sorted_unstable()
        .dedup()
        .collect()
}

/// Threshold-based appliance scheduler
#[derive(Debug, Clone, Copy)]
pub struct ThresholdScheduler {
    pub threshold_w_per_m2: f64,
}

impl ThresholdScheduler {
    pub fn new(threshold_w_per_m2: f64) -> Self {
        Self { threshold_w_per_m2 }
    }

    pub fn plan(&self, target_date: NaiveDate, predictions: &[PredictionRecord]) -> LoadSchedule {
        let hours = schedule(predictions, self.threshold_w_per_m2);
        debug!(
            %target_date,
            threshold = self.threshold_w_per_m2,
            qualifying = hours.len(),
            "scheduled appliance hours"
        );
        LoadSchedule {
            target_date,
            threshold_w_per_m2: self.threshold_w_per_m2,
            hours,
        }
    }
}
