use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use solar_load_planner::{config, controller, domain, error, repo, report, telemetry};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use config::Config;
use controller::{PlanRequest, Planner, ThresholdScheduler};
use error::FetchError;

#[derive(Parser)]
#[command(name = "solar-load-planner")]
#[command(about = "Forecast tomorrow's solar irradiance and recommend hours to run appliances", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch recent weather, forecast tomorrow and print recommended hours
    Plan {
        /// Latitude in degrees (-90..90)
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in degrees (-180..180)
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Irradiance threshold for load scheduling (W/m², 0..1000)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Treat this UTC date as today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Retrain the model from the observation log and overwrite the saved one
    Train,

    /// Print recommended hours for an existing predictions CSV
    Schedule {
        /// Predictions file (defaults to the configured output path)
        #[arg(short, long)]
        predictions: Option<PathBuf>,

        /// Irradiance threshold (W/m², 0..1000)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Date the predictions cover (YYYY-MM-DD, defaults to tomorrow UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    telemetry::init_tracing(cfg.telemetry.json);

    match run(cli.command, cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "run failed");
            match e.downcast_ref::<FetchError>() {
                Some(fetch) => eprintln!("Error: {}", fetch.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, cfg: Config) -> Result<()> {
    match command {
        Command::Plan {
            lat,
            lon,
            threshold,
            date,
        } => {
            let cfg = cfg.with_overrides(lat, lon, threshold)?;

            let today = date.unwrap_or_else(|| Utc::now().date_naive());
            let request = PlanRequest::from_config(&cfg, today);
            info!(
                latitude = request.location.latitude,
                longitude = request.location.longitude,
                %today,
                "starting planning run"
            );

            let planner = Planner::from_config(cfg)?;
            let outcome = planner.plan(&request).await?;
            println!("{}", report::render_plan_report(&outcome));
        }
        Command::Train => {
            let planner = Planner::from_config(cfg)?;
            let metadata = planner.retrain()?;
            println!(
                "Trained {} on {} samples: {}",
                metadata.model_id, metadata.training_samples, metadata.validation_metrics
            );
        }
        Command::Schedule {
            predictions,
            threshold,
            date,
        } => {
            let cfg = cfg.with_overrides(None, None, threshold)?;
            let path = predictions.unwrap_or_else(|| cfg.storage.predictions_path.clone());
            let records = repo::PredictionTable::new(path).load()?;
            let target_date = date.unwrap_or_else(|| Utc::now().date_naive() + chrono::Days::new(1));

            let schedule: domain::LoadSchedule =
                ThresholdScheduler::new(cfg.scheduler.threshold_w_per_m2).plan(target_date, &records);
            println!("{}", report::render_schedule(&schedule));
        }
    }
    Ok(())
}
