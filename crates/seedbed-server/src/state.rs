//! Shared application state

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use seedbed_core::errors::{ExError, ExErrorKind, Result};

/// State handed to every handler
///
/// Handlers only read. The connection is guarded by a mutex and must never
/// be held across an `.await`.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Open (and migrate) the database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(seedbed_store::db::open_migrated(path)?))
    }

    /// Lock the connection
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("db_lock")
                .with_message("database mutex poisoned")
        })
    }
}
