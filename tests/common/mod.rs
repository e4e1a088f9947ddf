//! Shared test doubles: a scripted backend and a local stub of the speed test service
#![allow(dead_code)]

pub mod stub_service;

use async_trait::async_trait;
use speedlog::collectors::{MeasurementError, SpeedtestBackend};
use speedlog::models::Server;

/// Backend returning canned figures, optionally failing at one step
#[derive(Debug, Clone)]
pub struct ScriptedBackend {
    pub best: Option<Server>,
    pub ping_ms: Option<f64>,
    pub download_bps: f64,
    pub upload_bps: f64,
    pub fail_download: bool,
}

impl ScriptedBackend {
    pub fn new(name: &str, country: &str) -> Self {
        Self {
            best: Some(Server::new("X1", name, country)),
            ping_ms: Some(12.3),
            download_bps: 50_000_000.0,
            upload_bps: 10_000_000.0,
            fail_download: false,
        }
    }

    /// A backend that cannot describe the server it picked
    pub fn anonymous() -> Self {
        Self {
            best: None,
            ..Self::new("", "")
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_download: true,
            ..Self::new("X", "Y")
        }
    }
}

#[async_trait]
impl SpeedtestBackend for ScriptedBackend {
    async fn discover_servers(&mut self) -> Result<Vec<Server>, MeasurementError> {
        Ok(vec![self.best.clone().unwrap_or_else(Server::unknown)])
    }

    async fn select_best(&mut self, _servers: &[Server]) -> Result<Server, MeasurementError> {
        Ok(self.best.clone().unwrap_or_else(Server::unknown))
    }

    async fn measure_download(&mut self, _server: &Server) -> Result<f64, MeasurementError> {
        if self.fail_download {
            return Err(MeasurementError::Transfer {
                direction: "download",
                reason: "network unreachable".to_string(),
            });
        }
        Ok(self.download_bps)
    }

    async fn measure_upload(&mut self, _server: &Server) -> Result<f64, MeasurementError> {
        Ok(self.upload_bps)
    }

    fn latency_ms(&self) -> Option<f64> {
        self.ping_ms
    }
}
