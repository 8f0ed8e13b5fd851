use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Hours of the target day recommended for running appliances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSchedule {
    pub target_date: NaiveDate,
    pub threshold_w_per_m2: f64,
    /// Strictly ascending
    pub hours: Vec<u32>,
}

impl LoadSchedule {
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.hours.binary_search(&hour).is_ok()
    }
}

impl std::fmt::Display for LoadSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_hours(&self.hours))
    }
}

/// `[8, 12]` -> `"8:00, 12:00"`
pub fn format_hours(hours: &[u32]) -> String {
    hours.iter().map(|h| format!("{h}:00")).join(", ")
}
