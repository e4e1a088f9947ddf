//! Speed test collection module
//!
//! ## Module Organization
//!
//! - `backend`: the `SpeedtestBackend` capability trait
//! - `cloudflare`: backend for Cloudflare's public speed test service
//! - `collector`: `SpeedtestCollector`, one measurement cycle into one record
//! - `errors`: measurement error type
//! - `formatting`: human-readable figures for log output
//!
//! ## Usage
//!
//! ```rust,no_run
//! use speedlog::collectors::speedtest::{CloudflareBackend, SpeedtestCollector};
//! use speedlog::config::BackendSettings;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let backend = CloudflareBackend::new(BackendSettings::default())?;
//! let mut collector = SpeedtestCollector::new(backend);
//! let record = collector.collect().await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cloudflare;
pub mod collector;
pub mod errors;
pub mod formatting;

pub use backend::SpeedtestBackend;
pub use cloudflare::CloudflareBackend;
pub use collector::SpeedtestCollector;
pub use errors::MeasurementError;
