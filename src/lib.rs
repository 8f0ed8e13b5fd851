//! Day-ahead solar irradiance forecasting and appliance scheduling.
//!
//! Historic hourly weather for a point is fetched from NASA POWER, logged to
//! CSV, and used to fit a random forest mapping
//! (hour, day-of-year, temperature, humidity) to irradiance. Tomorrow's
//! predicted irradiance then drives a threshold scheduler that recommends
//! hours for running appliances.

pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod ml;
pub mod report;
pub mod repo;
pub mod telemetry;
