//! Measurement error types
//!
//! Every variant aborts the run. There is no retry classification because
//! nothing in the pipeline retries.

use thiserror::Error;

/// Errors raised while discovering servers or running a speed test.
#[derive(Debug, Error)]
pub enum MeasurementError {
    #[error("HTTP request to the speed test service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no measurement servers available")]
    NoServers,

    #[error("server selection failed: {0}")]
    Selection(String),

    #[error("{direction} measurement failed: {reason}")]
    Transfer {
        direction: &'static str,
        reason: String,
    },

    #[error("invalid {field} reported by backend: {value}")]
    InvalidResult { field: &'static str, value: f64 },
}
