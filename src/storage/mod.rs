pub mod measurement_store;
pub mod schema;

pub use measurement_store::{MeasurementStore, StorageError};
