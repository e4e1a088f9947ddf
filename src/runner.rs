//! One measurement-and-save cycle
//!
//! Schema first, then the speed test, then the insert. The store is only touched
//! before and after the measurement, never during it.

use anyhow::{Context, Result};
use log::info;

use crate::collectors::speedtest::formatting::summarize;
use crate::collectors::speedtest::{SpeedtestBackend, SpeedtestCollector};
use crate::models::SavedMeasurement;
use crate::storage::MeasurementStore;

/// Runs exactly one cycle and returns the saved record.
///
/// A failure at any step ends the cycle; nothing is written unless the
/// measurement completed.
pub async fn run_once<B: SpeedtestBackend>(
    store: &MeasurementStore,
    collector: &mut SpeedtestCollector<B>,
) -> Result<SavedMeasurement> {
    store
        .ensure_schema()
        .context("Failed to initialize measurement store")?;

    let record = collector
        .collect()
        .await
        .context("Speed test failed")?;
    info!("Measured {}", summarize(&record));

    let id = store
        .save(&record)
        .context("Failed to save measurement")?;
    info!("Saved measurement {id} to {}", store.path().display());

    Ok(SavedMeasurement { id, record })
}
