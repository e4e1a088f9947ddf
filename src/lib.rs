//! speedlog: run one internet speed test and append it to a SQLite log.
//!
//! The pipeline is linear: `MeasurementStore::ensure_schema`, then
//! `SpeedtestCollector::collect`, then `MeasurementStore::save`.
//! `runner::run_once` strings the three together.

pub mod cli;
pub mod collectors;
pub mod config;
pub mod models;
pub mod runner;
pub mod storage;
