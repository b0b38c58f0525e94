//! Storage layer for the patient registry.

mod patients;
mod schema;

pub use schema::*;

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::Patient;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("patient not found: {0}")]
    NotFound(i64),

    #[error("corrupt stored value: {0}")]
    Corrupt(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Connection settings for the registry database.
///
/// Passed explicitly to [`Database::open`]; there is no ambient
/// connection state anywhere in the crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    /// Filesystem path of the SQLite database file.
    pub path: PathBuf,
}

impl DatabaseConfig {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

/// Capability set of the patient store.
///
/// The catalog service is generic over this trait, so the backing
/// persistence technology can be swapped without touching callers.
/// Every operation is a single round trip.
pub trait PatientStore {
    /// All active records, newest first.
    fn list(&self) -> DbResult<Vec<Patient>>;

    /// The record with this identifier, regardless of lifecycle state.
    fn get(&self, id: i64) -> DbResult<Option<Patient>>;

    /// Persist a new record. The store assigns the identifier and both
    /// timestamps and forces the lifecycle state to active; the stored
    /// record is returned.
    fn create(&self, patient: &Patient) -> DbResult<Patient>;

    /// Persist the writable fields of an existing record and refresh
    /// `updated_at`. Identifier, `created_at`, `created_by`, and the
    /// lifecycle state are untouched. Fails with [`DbError::NotFound`]
    /// when the identifier does not exist.
    fn update(&self, patient: &Patient) -> DbResult<Patient>;

    /// Mark a record deleted and refresh `updated_at`. Returns whether
    /// any record matched the identifier, already deleted or not.
    fn soft_delete(&self, id: i64) -> DbResult<bool>;

    /// Active records whose name, email, or phone number contains the
    /// term case-insensitively, newest first. An empty or whitespace
    /// term behaves as [`PatientStore::list`].
    fn search(&self, term: &str) -> DbResult<Vec<Patient>>;

    /// Presence check, independent of lifecycle state.
    fn exists(&self, id: i64) -> DbResult<bool>;
}

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database described by the config, creating it if needed.
    pub fn open(config: &DatabaseConfig) -> DbResult<Self> {
        Self::open_path(&config.path)
    }

    /// Open database at path, creating if needed.
    pub fn open_path<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(&path)?;
        let db = Self { conn };
        db.initialize()?;
        debug!("opened registry database at {}", path.as_ref().display());
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}
