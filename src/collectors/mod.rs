pub mod speedtest;

pub use speedtest::{CloudflareBackend, MeasurementError, SpeedtestBackend, SpeedtestCollector};
