//! Formatting utilities for measurement figures
//!
//! Used for the one-line summary logged after a run. Missing figures render as
//! "n/a" so a partial backend answer still produces a readable line.

use crate::models::MeasurementRecord;

/// Formats a throughput in megabits per second, switching to Gbps above 1000
///
/// # Examples
///
/// ```
/// use speedlog::collectors::speedtest::formatting::format_mbps;
///
/// assert_eq!(format_mbps(Some(0.0)), "0.00 Mbps");
/// assert_eq!(format_mbps(Some(94.317)), "94.32 Mbps");
/// assert_eq!(format_mbps(Some(1500.0)), "1.50 Gbps");
/// assert_eq!(format_mbps(None), "n/a");
/// ```
pub fn format_mbps(mbps: Option<f64>) -> String {
    match mbps {
        Some(value) if value >= 1000.0 => format!("{:.2} Gbps", value / 1000.0),
        Some(value) => format!("{value:.2} Mbps"),
        None => "n/a".to_string(),
    }
}

/// Formats a latency in milliseconds
pub fn format_latency(ms: Option<f64>) -> String {
    match ms {
        Some(value) => format!("{value:.1} ms"),
        None => "n/a".to_string(),
    }
}

/// One-line human summary of a record
pub fn summarize(record: &MeasurementRecord) -> String {
    format!(
        "ping {} | down {} | up {} | server {} ({})",
        format_latency(record.ping_ms),
        format_mbps(record.download_mbps),
        format_mbps(record.upload_mbps),
        record.server_name.as_deref().unwrap_or("unknown"),
        record.server_country.as_deref().unwrap_or("unknown"),
    )
}
