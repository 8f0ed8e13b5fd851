//! Outbound presentation: SVG chart and the plain-text plan report

pub mod chart;

pub use chart::{render_irradiance_chart, write_irradiance_chart, DEFAULT_CHART_SIZE};

use std::fmt::Write;

use crate::controller::PlanOutcome;
use crate::domain::LoadSchedule;

/// Recommendation block shown after a run
pub fn render_schedule(schedule: &LoadSchedule) -> String {
    if schedule.is_empty() {
        format!(
            "No hours with irradiance above {} W/m² found for {}.",
            schedule.threshold_w_per_m2, schedule.target_date
        )
    } else {
        format!(
            "Recommended Hours to Run Appliances (Based on Solar Irradiance)\n\
             Optimal hours (irradiance ≥ {} W/m²):\n{}",
            schedule.threshold_w_per_m2, schedule
        )
    }
}

/// Full text report for a planning run
pub fn render_plan_report(outcome: &PlanOutcome) -> String {
    let mut out = String::new();
    let model = &outcome.model;

    let _ = writeln!(
        out,
        "Fetched {} hourly observations up to {}",
        outcome.observations_fetched, outcome.today
    );
    let _ = writeln!(
        out,
        "Model {} ({}, {} samples): {}",
        model.model_id, model.model_type, model.training_samples, model.validation_metrics
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Predicted irradiance for {}", outcome.target_date);
    let _ = writeln!(out, "{:>4}  {:>10}", "Hour", "W/m²");
    for p in &outcome.predictions {
        let _ = writeln!(out, "{:>4}  {:>10.1}", p.hour, p.predicted_irradiance_w_per_m2);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", render_schedule(&outcome.schedule));
    let _ = writeln!(out);
    let _ = writeln!(out, "Chart: {}", outcome.chart_path.display());
    let _ = write!(out, "Predictions: {}", outcome.predictions_path.display());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn schedule(hours: Vec<u32>) -> LoadSchedule {
        LoadSchedule {
            target_date: NaiveDate::from_ymd_opt(2024, 6, 11).unwrap(),
            threshold_w_per_m2: 200.0,
            hours,
        }
    }

    #[test]
    fn test_render_schedule_with_hours() {
        let text = render_schedule(&schedule(vec![10, 11, 12]));
        assert!(text.contains("irradiance ≥ 200 W/m²"));
        assert!(text.ends_with("10:00, 11:00, 12:00"));
    }

    #[test]
    fn test_render_schedule_empty_is_warning() {
        assert_eq!(
            render_schedule(&schedule(vec![])),
            "No hours with irradiance above 200 W/m² found for 2024-06-11."
        );
    }
}
