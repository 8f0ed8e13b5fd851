//! End-to-end planning runs against a mocked NASA POWER endpoint.

use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use solar_load_planner::config::Config;
use solar_load_planner::controller::{PlanRequest, Planner};
use solar_load_planner::error::FetchError;
use solar_load_planner::repo::{ObservationLog, PredictionTable};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

/// Two clear days (June 9 and 10); hour 3 of June 10 has a fill value
fn power_body() -> Value {
    let mut irradiance = Map::new();
    let mut temperature = Map::new();
    let mut humidity = Map::new();

    for d in [9u32, 10] {
        for hour in 0..24u32 {
            let key = format!("202406{d:02}{hour:02}");
            let irr = if (6..=18).contains(&hour) {
                (900.0 * (std::f64::consts::PI * (hour as f64 - 6.0) / 12.0).sin()).max(0.0)
            } else {
                0.0
            };
            let irr_value = if d == 10 && hour == 3 { -999.0 } else { irr };
            irradiance.insert(key.clone(), json!(irr_value));
            temperature.insert(key.clone(), json!(20.0 + irr / 100.0));
            humidity.insert(key, json!(70.0 - irr / 30.0));
        }
    }

    json!({
        "type": "Feature",
        "properties": {
            "parameter": {
                "ALLSKY_SFC_SW_DWN": irradiance,
                "T2M": temperature,
                "RH2M": humidity
            }
        }
    })
}

fn test_config(dir: &Path, base_url: String) -> Config {
    let mut cfg = Config::default();
    cfg.nasa_power.base_url = base_url;
    cfg.nasa_power.http_timeout_seconds = 5;
    cfg.forecast.n_trees = 20;
    cfg.storage.log_path = dir.join("data/energy_logs.csv");
    cfg.storage.model_path = dir.join("models/energy_predictor.bin");
    cfg.storage.predictions_path = dir.join("output/predictions.csv");
    cfg.storage.chart_path = dir.join("output/irradiance.svg");
    cfg
}

async fn mock_power(body: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/temporal/hourly/point"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

fn request(cfg: &Config) -> PlanRequest {
    PlanRequest {
        threshold_w_per_m2: 200.0,
        ..PlanRequest::from_config(cfg, day(10))
    }
}

#[tokio::test]
async fn test_plan_produces_forecast_schedule_and_artifacts() {
    let server = mock_power(power_body()).await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(dir.path(), server.uri());
    let req = request(&cfg);

    let planner = Planner::from_config(cfg.clone()).unwrap();
    let outcome = planner.plan(&req).await.unwrap();

    assert_eq!(outcome.target_date, day(11));
    assert_eq!(outcome.observations_fetched, 48);
    assert_eq!(outcome.predictions.len(), 24);
    // Fill-value hour is missing from the actual series
    assert_eq!(outcome.today_actual.len(), 23);
    // One row dropped before training
    assert_eq!(outcome.model.training_samples, 47);

    let hours = &outcome.schedule.hours;
    assert!(hours.windows(2).all(|w| w[0] < w[1]));
    assert!(outcome.schedule.contains(12));
    assert!(!outcome.schedule.contains(0));
    assert!(!outcome.schedule.contains(23));

    assert_eq!(ObservationLog::new(&cfg.storage.log_path).load().unwrap().len(), 48);
    assert!(cfg.storage.model_path.is_file());
    assert!(cfg.storage.chart_path.is_file());
    assert_eq!(
        PredictionTable::new(&cfg.storage.predictions_path).load().unwrap(),
        outcome.predictions
    );
}

#[tokio::test]
async fn test_zero_threshold_recommends_every_hour() {
    let server = mock_power(power_body()).await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(dir.path(), server.uri());
    let req = PlanRequest {
        threshold_w_per_m2: 0.0,
        ..PlanRequest::from_config(&cfg, day(10))
    };

    let outcome = Planner::from_config(cfg).unwrap().plan(&req).await.unwrap();

    assert_eq!(outcome.schedule.hours, (0..24).collect::<Vec<u32>>());
    assert!(outcome
        .predictions
        .iter()
        .all(|p| p.predicted_irradiance_w_per_m2 >= 0.0));
}

#[tokio::test]
async fn test_saved_model_is_reused_and_predictions_repeat() {
    let server = mock_power(power_body()).await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(dir.path(), server.uri());
    let req = request(&cfg);
    let planner = Planner::from_config(cfg).unwrap();

    let first = planner.plan(&req).await.unwrap();
    let second = planner.plan(&req).await.unwrap();

    assert_eq!(first.model.model_id, second.model.model_id);
    assert_eq!(first.predictions, second.predictions);
    assert_eq!(first.schedule, second.schedule);
}

#[tokio::test]
async fn test_retrain_replaces_saved_model() {
    let server = mock_power(power_body()).await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(dir.path(), server.uri());
    let req = request(&cfg);
    let planner = Planner::from_config(cfg).unwrap();

    let before = planner.plan(&req).await.unwrap().model;
    let retrained = planner.retrain().unwrap();
    let after = planner.plan(&req).await.unwrap().model;

    assert_ne!(before.model_id, retrained.model_id);
    assert_eq!(after.model_id, retrained.model_id);
}

#[tokio::test]
async fn test_empty_upstream_halts_with_data_unavailable() {
    let server = mock_power(json!({
        "properties": {"parameter": {"ALLSKY_SFC_SW_DWN": {}, "T2M": {}, "RH2M": {}}}
    }))
    .await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(dir.path(), server.uri());
    let req = request(&cfg);

    let err = Planner::from_config(cfg.clone())
        .unwrap()
        .plan(&req)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FetchError>(),
        Some(FetchError::DataUnavailable(_))
    ));
    assert!(!cfg.storage.log_path.exists());
    assert!(!cfg.storage.model_path.exists());
}

#[tokio::test]
async fn test_malformed_upstream_is_shape_error() {
    let server = mock_power(json!({"messages": ["unexpected"]})).await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(dir.path(), server.uri());
    let req = request(&cfg);

    let err = Planner::from_config(cfg)
        .unwrap()
        .plan(&req)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FetchError>(),
        Some(FetchError::UnexpectedResponse(_))
    ));
}
