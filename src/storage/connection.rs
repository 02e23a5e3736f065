//! Connection Manager - owns the single physical connection.
//!
//! Opens the store lazily, applies version-gated schema upgrades and seeds
//! first-run default data. All of that happens at most once per manager no
//! matter how many callers race on `initialize()`: the first caller to
//! observe the empty cell runs the open, every other caller awaits the same
//! in-flight attempt. A failed attempt is never cached as success, so a
//! later call may try again.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::{Mutex, OnceCell};

use super::schema;
use crate::logbook::Logbook;
use crate::repository::{logbooks, settings};
use crate::settings::AppSettings;
use crate::{Error, Result};

/// The one connection handle, shared by every repository.
pub type SharedConnection = Arc<Mutex<Connection>>;

#[derive(Debug)]
enum Location {
    Disk(PathBuf),
    Memory,
}

/// Produces exactly one live connection, creating missing schema objects and
/// bootstrapping default data on the way.
///
/// Cheap to clone; clones share the same underlying cell and therefore the
/// same connection.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<Inner>,
}

struct Inner {
    location: Location,
    cell: OnceCell<SharedConnection>,
}

impl ConnectionManager {
    /// Manager for an on-disk store. No I/O happens until the first
    /// operation or `initialize()` call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                location: Location::Disk(path.into()),
                cell: OnceCell::new(),
            }),
        }
    }

    /// Manager for an in-memory store (for testing).
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Inner {
                location: Location::Memory,
                cell: OnceCell::new(),
            }),
        }
    }

    /// Open the store if nobody has yet. Idempotent; safe to call from any
    /// number of concurrent callers.
    pub async fn initialize(&self) -> Result<()> {
        self.handle().await.map(|_| ())
    }

    /// The shared connection, opening the store on first use.
    pub(crate) async fn handle(&self) -> Result<SharedConnection> {
        self.inner
            .cell
            .get_or_try_init(|| async { self.open() })
            .await
            .cloned()
    }

    /// Open the physical store, upgrade its schema and bootstrap defaults.
    /// Runs at most once per successful attempt, guarded by the cell.
    fn open(&self) -> Result<SharedConnection> {
        let mut conn = match &self.inner.location {
            Location::Disk(path) => Connection::open(path),
            Location::Memory => Connection::open_in_memory(),
        }
        .map_err(|e| Error::StorageUnavailable(e.to_string()))?;

        apply_migrations(&mut conn)?;
        bootstrap_defaults(&mut conn)?;

        tracing::info!(location = ?self.inner.location, "store ready");
        Ok(Arc::new(Mutex::new(conn)))
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("location", &self.inner.location)
            .field("opened", &self.inner.cell.initialized())
            .finish()
    }
}

/// Bring the schema up to `SCHEMA_VERSION`.
///
/// Upgrades are additive: every DDL statement checks for existence, so
/// stepping through versions re-runs cleanly and never drops user data.
fn apply_migrations(conn: &mut Connection) -> Result<()> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(migration_err)?;

    if version > schema::SCHEMA_VERSION {
        return Err(Error::Migration(format!(
            "store is at version {}, this build supports up to {}",
            version,
            schema::SCHEMA_VERSION
        )));
    }

    if version < schema::SCHEMA_VERSION {
        tracing::info!(from = version, to = schema::SCHEMA_VERSION, "upgrading store schema");
        let tx = conn.transaction().map_err(migration_err)?;
        for stmt in schema::all_schema_statements() {
            tx.execute(stmt, []).map_err(migration_err)?;
        }
        tx.pragma_update(None, "user_version", schema::SCHEMA_VERSION)
            .map_err(migration_err)?;
        tx.commit().map_err(migration_err)?;
    }

    Ok(())
}

/// First-run seed: one default logbook plus settings pointing at it,
/// written in a single transaction. Keyed off the settings row so a store
/// that already ran bootstrap is left untouched.
fn bootstrap_defaults(conn: &mut Connection) -> Result<()> {
    if settings::select(conn)?.is_some() {
        return Ok(());
    }

    tracing::info!("fresh store, creating default logbook and settings");

    let logbook = Logbook::new("My Logbook", "Default logbook");
    let app_settings = AppSettings::with_default_logbook(logbook.id);

    let tx = conn.transaction().map_err(migration_err)?;
    logbooks::put(&tx, &logbook).map_err(|e| Error::Migration(e.to_string()))?;
    settings::put(&tx, &app_settings).map_err(|e| Error::Migration(e.to_string()))?;
    tx.commit().map_err(migration_err)?;

    Ok(())
}

fn migration_err(err: rusqlite::Error) -> Error {
    Error::Migration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_initialize_bootstraps_once() {
        let manager = ConnectionManager::in_memory();

        let results = tokio::join!(
            manager.initialize(),
            manager.initialize(),
            manager.initialize(),
            manager.initialize(),
            manager.initialize(),
        );
        results.0.unwrap();
        results.1.unwrap();
        results.2.unwrap();
        results.3.unwrap();
        results.4.unwrap();

        let handle = manager.handle().await.unwrap();
        let conn = handle.lock().await;
        let logbooks: i64 = conn
            .query_row("SELECT COUNT(*) FROM logbooks", [], |row| row.get(0))
            .unwrap();
        let settings: i64 = conn
            .query_row("SELECT COUNT(*) FROM app_settings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(logbooks, 1);
        assert_eq!(settings, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_initialize_bootstraps_once() {
        let manager = ConnectionManager::in_memory();

        let mut tasks = Vec::new();
        for _ in 0..10 {
            let m = manager.clone();
            tasks.push(tokio::spawn(async move { m.initialize().await }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let handle = manager.handle().await.unwrap();
        let conn = handle.lock().await;
        let logbooks: i64 = conn
            .query_row("SELECT COUNT(*) FROM logbooks", [], |row| row.get(0))
            .unwrap();
        assert_eq!(logbooks, 1);
    }

    #[tokio::test]
    async fn test_reopen_is_additive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logbook.db");

        {
            let manager = ConnectionManager::new(&path);
            manager.initialize().await.unwrap();
        }

        // A second manager re-runs the upgrade path against a current store;
        // nothing is duplicated and nothing errors.
        let manager = ConnectionManager::new(&path);
        manager.initialize().await.unwrap();

        let handle = manager.handle().await.unwrap();
        let conn = handle.lock().await;
        let logbooks: i64 = conn
            .query_row("SELECT COUNT(*) FROM logbooks", [], |row| row.get(0))
            .unwrap();
        assert_eq!(logbooks, 1);
    }

    #[tokio::test]
    async fn test_newer_store_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logbook.db");

        {
            let conn = Connection::open(&path).unwrap();
            conn.pragma_update(None, "user_version", 99).unwrap();
        }

        let manager = ConnectionManager::new(&path);
        let err = manager.initialize().await.unwrap_err();
        assert!(matches!(err, Error::Migration(_)));
    }

    #[tokio::test]
    async fn test_failed_open_is_not_cached() {
        // A directory path cannot be opened as a database file.
        let dir = tempfile::tempdir().unwrap();
        let manager = ConnectionManager::new(dir.path());

        let first = manager.initialize().await;
        assert!(first.is_err());

        // The failure was not latched: a later call attempts the open again
        // and reports the same condition instead of a poisoned state.
        let second = manager.initialize().await;
        assert!(second.is_err());
    }
}
