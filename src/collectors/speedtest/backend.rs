//! Speed test capability interface
//!
//! The collector never talks to the network itself. It drives a
//! `SpeedtestBackend`, which owns server discovery, server selection and the
//! actual transfers. Tests substitute their own implementation.

use async_trait::async_trait;

use crate::collectors::speedtest::errors::MeasurementError;
use crate::models::Server;

/// A source of network speed measurements.
///
/// Calls happen in a fixed order: `discover_servers`, `select_best`,
/// `measure_download`, `measure_upload`, then `latency_ms`.
#[async_trait]
pub trait SpeedtestBackend: Send {
    /// Lists the servers this backend can measure against.
    async fn discover_servers(&mut self) -> Result<Vec<Server>, MeasurementError>;

    /// Picks the server to measure against, following the backend's own policy.
    /// Records the latency to the chosen server as a side effect.
    async fn select_best(&mut self, servers: &[Server]) -> Result<Server, MeasurementError>;

    /// Download throughput in bits per second.
    async fn measure_download(&mut self, server: &Server) -> Result<f64, MeasurementError>;

    /// Upload throughput in bits per second.
    async fn measure_upload(&mut self, server: &Server) -> Result<f64, MeasurementError>;

    /// Latency in milliseconds recorded by the previous calls, if any.
    fn latency_ms(&self) -> Option<f64>;
}
