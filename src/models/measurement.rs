//! Measurement data structures
//!
//! A `MeasurementRecord` is the normalized outcome of one speed test. It is built
//! once by the collector, handed to the store, and never modified afterwards.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A measurement server as reported by the speed test backend.
/// Every field is optional; backends fill in what they know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Backend-specific identifier (e.g. a Cloudflare colo code such as "AMS")
    pub id: Option<String>,
    /// Human-readable server name, usually the hosting city
    pub name: Option<String>,
    /// Country of the server
    pub country: Option<String>,
}

impl Server {
    pub fn new(id: impl Into<String>, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            country: Some(country.into()),
        }
    }

    /// A server the backend could not describe: no name, no country.
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// One persisted outcome of a single network speed test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// UTC instant the measurement was taken
    #[serde(rename = "ts_utc", with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    /// Round-trip latency in milliseconds
    pub ping_ms: Option<f64>,
    /// Download throughput in megabits per second
    pub download_mbps: Option<f64>,
    /// Upload throughput in megabits per second
    pub upload_mbps: Option<f64>,
    /// Name of the server the test ran against
    pub server_name: Option<String>,
    /// Country of the server the test ran against
    pub server_country: Option<String>,
}

impl MeasurementRecord {
    /// Timestamp in the textual form stored in the `ts_utc` column
    pub fn ts_utc(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}

/// A record together with the row id the store assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMeasurement {
    pub id: i64,
    #[serde(flatten)]
    pub record: MeasurementRecord,
}

/// Renders a timestamp as ISO-8601 with microseconds and a `Z` suffix.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses a stored `ts_utc` value back into a UTC instant.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|ts| ts.with_timezone(&Utc))
}

mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_timestamp(&text).map_err(serde::de::Error::custom)
    }
}
