use crate::models::MeasurementRecord;
use crate::storage::schema::create_tables;
use log::{debug, info};
use rusqlite::{named_params, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Storage-access failures. None of them are retried.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create database directory {path}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open database {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create database tables")]
    Schema(#[source] rusqlite::Error),

    #[error("failed to insert measurement")]
    Insert(#[source] rusqlite::Error),
}

/// Handle on the SQLite file holding all measurement records.
///
/// The handle only remembers where the database lives. Every operation opens
/// its own connection and drops it before returning, so nothing stays open
/// while a speed test is running.
#[derive(Debug, Clone)]
pub struct MeasurementStore {
    path: PathBuf,
}

impl MeasurementStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            path: db_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the measurement table if it is missing. Safe to call on every start.
    pub fn ensure_schema(&self) -> Result<(), StorageError> {
        // Ensure the parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = self.connect(OpenFlags::default())?;
        create_tables(&conn).map_err(StorageError::Schema)?;

        info!("Measurement store ready at {}", self.path.display());
        Ok(())
    }

    /// Appends one record and returns the row id assigned to it.
    ///
    /// The database must already exist: it is opened without the create flag,
    /// so a store that was never initialized fails here instead of leaving an
    /// empty file behind.
    pub fn save(&self, record: &MeasurementRecord) -> Result<i64, StorageError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let mut conn = self.connect(flags)?;

        let tx = conn.transaction().map_err(StorageError::Insert)?;
        tx.execute(
            "INSERT INTO speedtests
             (ts_utc, ping_ms, download_mbps, upload_mbps, server_name, server_country)
             VALUES (:ts_utc, :ping_ms, :download_mbps, :upload_mbps, :server_name, :server_country)",
            named_params! {
                ":ts_utc": record.ts_utc(),
                ":ping_ms": record.ping_ms,
                ":download_mbps": record.download_mbps,
                ":upload_mbps": record.upload_mbps,
                ":server_name": record.server_name.as_deref(),
                ":server_country": record.server_country.as_deref(),
            },
        )
        .map_err(StorageError::Insert)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(StorageError::Insert)?;

        debug!("Inserted measurement row {id} at {}", record.ts_utc());
        Ok(id)
    }

    fn connect(&self, flags: OpenFlags) -> Result<Connection, StorageError> {
        let open_error = |source| StorageError::Open {
            path: self.path.clone(),
            source,
        };

        let conn = Connection::open_with_flags(&self.path, flags).map_err(open_error)?;

        // WAL is best effort, not every filesystem supports it
        let _ = conn.pragma_update(None, "journal_mode", "WAL");

        conn.busy_timeout(Duration::from_secs(5)).map_err(open_error)?;

        Ok(conn)
    }
}
