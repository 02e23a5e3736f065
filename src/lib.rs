//! # HeureDeVol - personal flight logbook storage core
//!
//! Embedded, local-first persistence for a pilot's flight records.
//!
//! HeureDeVol provides:
//! - A single SQLite-backed store with versioned, additive schema upgrades
//! - Typed repositories for settings, aircraft types, logbooks and flights
//! - Idempotent, single-flight initialization safe under concurrent callers
//! - One-time bootstrap of a default logbook and application settings

pub mod aircraft_type;
pub mod flight;
pub mod logbook;
pub mod repository;
pub mod settings;
pub mod storage;
pub mod store;

// Re-exports for convenient access
pub use aircraft_type::AircraftType;
pub use flight::Flight;
pub use logbook::{FieldLabels, FlightFields, Logbook};
pub use settings::{AppSettings, Theme, Units};
pub use store::HdvStore;

/// Result type alias for HeureDeVol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for HeureDeVol operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying engine could not be opened at all. Fatal for the
    /// session; surfaced to the UI boundary, never retried automatically.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A schema upgrade or first-run bootstrap step failed. A later
    /// `initialize()` call is free to attempt the upgrade again.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// `add()` was called with a caller-supplied key that already exists.
    /// Callers wanting upsert semantics use `update()`.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// A logbook still has flights referencing it and cannot be deleted.
    #[error("Logbook {0} still contains flights")]
    LogbookNotEmpty(uuid::Uuid),

    /// Generic engine-level I/O failure during an operation.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A persisted row could not be decoded back into its entity.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
