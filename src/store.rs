//! Store Facade - the single access point over the embedded database.
//!
//! Constructed explicitly once at startup and passed by reference to
//! whoever needs it; there is no hidden global. All repositories share the
//! facade's one connection manager, so ten components each triggering
//! `initialize()` during their own setup still bootstrap the store once.

use std::path::Path;

use crate::logbook::Logbook;
use crate::repository::{
    AircraftTypesRepository, FlightsRepository, LogbooksRepository, SettingsRepository,
};
use crate::storage::ConnectionManager;
use crate::Result;

/// The flight-logbook store.
///
/// Owns the connection manager and one repository per collection. The
/// repositories are the public read/write surface; `default_logbook` is the
/// one derived convenience query.
pub struct HdvStore {
    manager: ConnectionManager,
    pub settings: SettingsRepository,
    pub aircraft_types: AircraftTypesRepository,
    pub logbooks: LogbooksRepository,
    pub flights: FlightsRepository,
}

impl HdvStore {
    /// Store backed by a database file (created on first use).
    ///
    /// No I/O happens here; the file is opened, upgraded and bootstrapped
    /// lazily by the first operation or `initialize()` call.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::with_manager(ConnectionManager::new(path.as_ref()))
    }

    /// Store backed by an in-memory database (for testing).
    pub fn open_in_memory() -> Self {
        Self::with_manager(ConnectionManager::in_memory())
    }

    fn with_manager(manager: ConnectionManager) -> Self {
        Self {
            settings: SettingsRepository::new(manager.clone()),
            aircraft_types: AircraftTypesRepository::new(manager.clone()),
            logbooks: LogbooksRepository::new(manager.clone()),
            flights: FlightsRepository::new(manager.clone()),
            manager,
        }
    }

    /// Open the store if nobody has yet: apply schema upgrades and seed
    /// first-run defaults. Idempotent and safe under concurrent callers.
    pub async fn initialize(&self) -> Result<()> {
        self.manager.initialize().await
    }

    /// The logbook configured as default in the settings, or the first one
    /// found when none is configured.
    ///
    /// Returns `None` when the configured logbook has been deleted since;
    /// callers treat that as "no default available". The unconfigured
    /// fallback follows an unordered scan and is not guaranteed stable
    /// across calls.
    pub async fn default_logbook(&self) -> Result<Option<Logbook>> {
        let settings = self.settings.get().await?;
        if let Some(id) = settings.and_then(|s| s.default_logbook_id) {
            return self.logbooks.get(id).await;
        }

        let logbooks = self.logbooks.get_all().await?;
        Ok(logbooks.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_store_scenario() {
        let store = HdvStore::open_in_memory();
        store.initialize().await.unwrap();

        let logbooks = store.logbooks.get_all().await.unwrap();
        assert_eq!(logbooks.len(), 1);
        assert_eq!(logbooks[0].name, "My Logbook");

        let settings = store.settings.get().await.unwrap().unwrap();
        assert_eq!(settings.default_logbook_id, Some(logbooks[0].id));
    }

    #[tokio::test]
    async fn test_operations_initialize_lazily() {
        // Repository calls await the shared connection without an explicit
        // initialize() first.
        let store = HdvStore::open_in_memory();
        let logbooks = store.logbooks.get_all().await.unwrap();
        assert_eq!(logbooks.len(), 1);
    }

    #[tokio::test]
    async fn test_default_logbook_follows_settings() {
        let store = HdvStore::open_in_memory();
        store.initialize().await.unwrap();

        let second = Logbook::new("Second", "");
        store.logbooks.add(&second).await.unwrap();

        let mut settings = store.settings.get().await.unwrap().unwrap();
        settings.default_logbook_id = Some(second.id);
        store.settings.update(&settings).await.unwrap();

        let default = store.default_logbook().await.unwrap().unwrap();
        assert_eq!(default.id, second.id);
    }

    #[tokio::test]
    async fn test_default_logbook_falls_back_when_unset() {
        let store = HdvStore::open_in_memory();
        store.initialize().await.unwrap();

        let mut settings = store.settings.get().await.unwrap().unwrap();
        settings.default_logbook_id = None;
        store.settings.update(&settings).await.unwrap();

        // Some existing logbook comes back, not absent.
        assert!(store.default_logbook().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_default_logbook_stale_reference_is_absent() {
        let store = HdvStore::open_in_memory();
        store.initialize().await.unwrap();

        let settings = store.settings.get().await.unwrap().unwrap();
        let default_id = settings.default_logbook_id.unwrap();
        store.logbooks.delete(default_id).await.unwrap();

        assert!(store.default_logbook().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reopened_store_keeps_user_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logbook.db");

        let first_id = {
            let store = HdvStore::open(&path);
            store.initialize().await.unwrap();
            let logbook = Logbook::new("Tailwheel", "");
            store.logbooks.add(&logbook).await.unwrap();
            logbook.id
        };

        let store = HdvStore::open(&path);
        store.initialize().await.unwrap();
        // Bootstrap did not run again and the user's logbook survived.
        assert_eq!(store.logbooks.get_all().await.unwrap().len(), 2);
        assert!(store.logbooks.get(first_id).await.unwrap().is_some());
    }
}
