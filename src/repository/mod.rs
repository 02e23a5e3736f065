//! Entity Repositories - typed CRUD over the shared connection.
//!
//! One repository per collection. Each holds a clone of the
//! [`ConnectionManager`](crate::storage::ConnectionManager) and awaits the
//! shared handle per operation; none ever opens a connection of its own.
//!
//! Common contract shape:
//! - `add` inserts and fails with `DuplicateKey` on an existing
//!   caller-supplied key (flights get their key from the engine instead)
//! - `get` returns `Ok(None)` for a missing row; absence is not an error
//! - `update` has put semantics: overwrite if present, insert if absent
//! - `delete` is idempotent; deleting an absent key succeeds

pub mod aircraft_types;
pub mod flights;
pub mod logbooks;
pub mod settings;

pub use aircraft_types::AircraftTypesRepository;
pub use flights::FlightsRepository;
pub use logbooks::LogbooksRepository;
pub use settings::SettingsRepository;

use crate::Error;

/// Map a key collision on INSERT to `DuplicateKey`.
///
/// Only primary-key and unique-index violations qualify; other constraint
/// failures (NOT NULL, CHECK) stay generic `Storage` errors.
pub(crate) fn insert_err(err: rusqlite::Error, key: impl std::fmt::Display) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(code, _)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Error::DuplicateKey(key.to_string())
        }
        other => Error::Storage(other),
    }
}

/// Wrap a column decode failure so it surfaces through rusqlite row mapping.
pub(crate) fn decode_err<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraint_failure(extended_code: std::ffi::c_int) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ErrorCode::ConstraintViolation,
                extended_code,
            },
            None,
        )
    }

    #[test]
    fn test_insert_err_maps_key_collisions_only() {
        let err = insert_err(
            constraint_failure(rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY),
            "some-key",
        );
        assert!(matches!(err, Error::DuplicateKey(_)));

        let err = insert_err(
            constraint_failure(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE),
            "some-key",
        );
        assert!(matches!(err, Error::DuplicateKey(_)));

        // A NOT NULL violation is a schema problem, not a duplicate.
        let err = insert_err(
            constraint_failure(rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL),
            "some-key",
        );
        assert!(matches!(err, Error::Storage(_)));
    }
}
