pub mod measurement;

pub use measurement::{
    format_timestamp, parse_timestamp, MeasurementRecord, SavedMeasurement, Server,
};
