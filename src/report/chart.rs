use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::domain::PredictionRecord;
use crate::repo::ensure_parent_dir;

pub const DEFAULT_CHART_SIZE: (u32, u32) = (1000, 600);

/// Generate an SVG line chart of today's measured irradiance against
/// tomorrow's predicted irradiance, hours 0-24 on the x axis.
///
/// Empty series still produce a chart with axes and legend.
pub fn render_irradiance_chart(
    today_actual: &[(u32, f64)],
    tomorrow_predicted: &[PredictionRecord],
    size: (u32, u32),
) -> Result<String> {
    let mut svg_data = String::new();

    let values: Vec<f64> = today_actual
        .iter()
        .map(|(_, v)| *v)
        .chain(tomorrow_predicted.iter().map(|p| p.predicted_irradiance_w_per_m2))
        .filter(|v| v.is_finite())
        .collect();
    let max_value = values.iter().copied().fold(0.0_f64, f64::max);
    let min_value = values.iter().copied().fold(0.0_f64, f64::min);

    // 10% headroom, never a zero-height axis
    let y_max = if max_value > 0.0 { max_value * 1.1 } else { 100.0 };
    let y_min = if min_value < 0.0 { min_value * 1.1 } else { 0.0 };

    {
        let root = SVGBackend::with_string(&mut svg_data, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Solar Irradiance: Today vs Tomorrow Prediction",
                ("sans-serif", 22),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..24f64, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Hour of Day (0-24)")
            .y_desc("Solar Irradiance (W/m²)")
            .x_labels(25)
            .y_labels(10)
            .x_label_formatter(&|x| format!("{x:.0}"))
            .draw()?;

        chart
            .draw_series(
                LineSeries::new(
                    today_actual.iter().map(|(h, v)| (*h as f64, *v)),
                    BLUE.stroke_width(2),
                )
                .point_size(4),
            )?
            .label("Today - Actual")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

        chart
            .draw_series(
                LineSeries::new(
                    tomorrow_predicted
                        .iter()
                        .map(|p| (p.hour as f64, p.predicted_irradiance_w_per_m2)),
                    RED.stroke_width(2),
                )
                .point_size(4),
            )?
            .label("Tomorrow - Predicted")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
    } // root is dropped here, releasing the borrow on svg_data

    Ok(svg_data)
}

/// Render the chart and write it to `path`
pub fn write_irradiance_chart(
    path: &Path,
    today_actual: &[(u32, f64)],
    tomorrow_predicted: &[PredictionRecord],
) -> Result<()> {
    let svg = render_irradiance_chart(today_actual, tomorrow_predicted, DEFAULT_CHART_SIZE)?;
    ensure_parent_dir(path)?;
    std::fs::write(path, svg).with_context(|| format!("failed to write chart {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_contains_both_series() {
        let actual = vec![(6, 50.0), (12, 800.0), (18, 20.0)];
        let predicted: Vec<PredictionRecord> = (0..24)
            .map(|h| PredictionRecord::new(h, if (6..=18).contains(&h) { 600.0 } else { 0.0 }))
            .collect();

        let svg = render_irradiance_chart(&actual, &predicted, (800, 480)).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Today - Actual"));
        assert!(svg.contains("Tomorrow - Predicted"));
        assert!(svg.contains("Hour of Day (0-24)"));
    }

    #[test]
    fn test_chart_with_no_data() {
        let svg = render_irradiance_chart(&[], &[], (400, 300)).unwrap();
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_write_chart_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output/irradiance.svg");

        write_irradiance_chart(&path, &[(12, 500.0)], &[PredictionRecord::new(12, 450.0)]).unwrap();
        assert!(path.is_file());
    }
}
