//! Core speed test collector
//!
//! Runs one measurement cycle against a `SpeedtestBackend` and shapes the
//! backend's raw figures into a `MeasurementRecord`.

use chrono::Utc;
use log::{debug, info};

use crate::collectors::speedtest::backend::SpeedtestBackend;
use crate::collectors::speedtest::errors::MeasurementError;
use crate::models::{MeasurementRecord, Server};

const BITS_PER_MEGABIT: f64 = 1_000_000.0;

/// Drives a backend through exactly one discover/select/download/upload cycle
#[derive(Debug)]
pub struct SpeedtestCollector<B> {
    backend: B,
}

impl<B: SpeedtestBackend> SpeedtestCollector<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Performs one measurement cycle.
    ///
    /// Any backend failure is returned as-is; no partial record is produced.
    pub async fn collect(&mut self) -> Result<MeasurementRecord, MeasurementError> {
        let servers = self.backend.discover_servers().await?;
        if servers.is_empty() {
            return Err(MeasurementError::NoServers);
        }
        debug!("Discovered {} measurement servers", servers.len());

        let server = self.backend.select_best(&servers).await?;
        info!(
            "Selected server {} ({})",
            server.name.as_deref().unwrap_or("unknown"),
            server.country.as_deref().unwrap_or("unknown")
        );

        let download_bps = self.backend.measure_download(&server).await?;
        let download_mbps = bits_to_megabits(download_bps, "download throughput")?;
        debug!("Download: {download_mbps:.2} Mbps");

        let upload_bps = self.backend.measure_upload(&server).await?;
        let upload_mbps = bits_to_megabits(upload_bps, "upload throughput")?;
        debug!("Upload: {upload_mbps:.2} Mbps");

        let ping_ms = self.backend.latency_ms().filter(|ms| ms.is_finite() && *ms >= 0.0);

        Ok(build_record(server, ping_ms, download_mbps, upload_mbps))
    }
}

/// Converts a throughput in bits per second to megabits per second,
/// rejecting values no real transfer can produce.
pub fn bits_to_megabits(bits_per_second: f64, field: &'static str) -> Result<f64, MeasurementError> {
    if !bits_per_second.is_finite() || bits_per_second < 0.0 {
        return Err(MeasurementError::InvalidResult {
            field,
            value: bits_per_second,
        });
    }
    Ok(bits_per_second / BITS_PER_MEGABIT)
}

fn build_record(server: Server, ping_ms: Option<f64>, download_mbps: f64, upload_mbps: f64) -> MeasurementRecord {
    MeasurementRecord {
        timestamp: Utc::now(),
        ping_ms,
        download_mbps: Some(download_mbps),
        upload_mbps: Some(upload_mbps),
        server_name: non_empty(server.name),
        server_country: non_empty(server.country),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
