//! Speed test backend for Cloudflare's public speed test service
//!
//! Cloudflare serves every test from the anycast colo closest to the client, so
//! "selecting" a server means asking the service which colo answered and looking
//! it up in the published location list.

use std::time::Instant;

use async_trait::async_trait;
use log::{debug, trace, warn};
use serde::Deserialize;

use crate::collectors::speedtest::backend::SpeedtestBackend;
use crate::collectors::speedtest::errors::MeasurementError;
use crate::config::BackendSettings;
use crate::models::Server;

/// One entry of the `/locations` listing
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub iata: String,
    pub cca2: String,
    pub city: String,
}

impl From<Location> for Server {
    fn from(location: Location) -> Self {
        Server::new(location.iata, location.city, location.cca2)
    }
}

#[derive(Debug)]
pub struct CloudflareBackend {
    client: reqwest::Client,
    settings: BackendSettings,
    latency_ms: Option<f64>,
}

impl CloudflareBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, MeasurementError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            settings,
            latency_ms: None,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// Colo code of the Cloudflare edge answering this client
    async fn current_colo(&self) -> Result<String, MeasurementError> {
        let body = self
            .client
            .get(self.url("/cdn-cgi/trace"))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_trace_colo(&body)
            .ok_or_else(|| MeasurementError::Selection("trace response has no colo field".to_string()))
    }

    /// Median round trip of zero-byte downloads, in milliseconds
    async fn measure_latency(&self) -> Result<f64, MeasurementError> {
        let url = self.url("/__down?bytes=0");
        let mut samples = Vec::with_capacity(self.settings.latency_samples);

        for _ in 0..self.settings.latency_samples.max(1) {
            let started = Instant::now();
            self.client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            trace!("Latency sample: {elapsed_ms:.2} ms");
            samples.push(elapsed_ms);
        }

        median(&mut samples)
            .ok_or_else(|| MeasurementError::Selection("no latency samples collected".to_string()))
    }
}

#[async_trait]
impl SpeedtestBackend for CloudflareBackend {
    async fn discover_servers(&mut self) -> Result<Vec<Server>, MeasurementError> {
        let locations: Vec<Location> = self
            .client
            .get(self.url("/locations"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("Cloudflare lists {} locations", locations.len());
        Ok(locations.into_iter().map(Server::from).collect())
    }

    async fn select_best(&mut self, servers: &[Server]) -> Result<Server, MeasurementError> {
        let colo = self.current_colo().await?;
        let server = resolve_colo(servers, &colo);
        if server.name.is_none() {
            warn!("Colo {colo} is not in the published location list");
        }

        self.latency_ms = Some(self.measure_latency().await?);

        Ok(server)
    }

    async fn measure_download(&mut self, _server: &Server) -> Result<f64, MeasurementError> {
        let url = self.url(&format!("/__down?bytes={}", self.settings.download_bytes));

        let started = Instant::now();
        let mut response = self.client.get(&url).send().await?.error_for_status()?;
        let mut received: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            received += chunk.len() as u64;
        }
        let elapsed = started.elapsed().as_secs_f64();

        if received == 0 {
            return Err(MeasurementError::Transfer {
                direction: "download",
                reason: "empty response body".to_string(),
            });
        }
        debug!("Downloaded {received} bytes in {elapsed:.2}s");

        throughput_bps(received, elapsed, "download")
    }

    async fn measure_upload(&mut self, _server: &Server) -> Result<f64, MeasurementError> {
        let payload = vec![0u8; self.settings.upload_bytes];
        let sent = payload.len() as u64;

        let started = Instant::now();
        self.client
            .post(self.url("/__up"))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(payload)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let elapsed = started.elapsed().as_secs_f64();
        debug!("Uploaded {sent} bytes in {elapsed:.2}s");

        throughput_bps(sent, elapsed, "upload")
    }

    fn latency_ms(&self) -> Option<f64> {
        self.latency_ms
    }
}

/// Extracts the `colo=` value from a `/cdn-cgi/trace` body
pub fn parse_trace_colo(body: &str) -> Option<String> {
    body.lines()
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == "colo")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Finds the server for `colo`, or an anonymous server carrying only the colo id
pub fn resolve_colo(servers: &[Server], colo: &str) -> Server {
    servers
        .iter()
        .find(|server| server.id.as_deref().is_some_and(|id| id.eq_ignore_ascii_case(colo)))
        .cloned()
        .unwrap_or_else(|| Server {
            id: Some(colo.to_string()),
            ..Server::unknown()
        })
}

fn throughput_bps(bytes: u64, elapsed_secs: f64, direction: &'static str) -> Result<f64, MeasurementError> {
    if elapsed_secs <= 0.0 {
        return Err(MeasurementError::Transfer {
            direction,
            reason: "transfer finished in zero time".to_string(),
        });
    }
    Ok(bytes as f64 * 8.0 / elapsed_secs)
}

fn median(samples: &mut [f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_by(|a, b| a.total_cmp(b));
    let mid = samples.len() / 2;
    if samples.len() % 2 == 0 {
        Some((samples[mid - 1] + samples[mid]) / 2.0)
    } else {
        Some(samples[mid])
    }
}
