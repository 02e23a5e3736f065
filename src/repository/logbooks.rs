//! Logbooks repository.
//!
//! Deleting a logbook that still has flights is refused with
//! `LogbookNotEmpty`; callers delete or move the flights first. This keeps
//! the flight -> logbook reference consistent even though the engine itself
//! enforces no foreign keys.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use super::{decode_err, insert_err};
use crate::logbook::Logbook;
use crate::storage::ConnectionManager;
use crate::{Error, Result};

const COLUMNS: &str = "id, name, description, created, flight_fields, field_labels";

pub struct LogbooksRepository {
    manager: ConnectionManager,
}

impl LogbooksRepository {
    pub(crate) fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// Insert a new logbook. Fails with `DuplicateKey` if the id exists.
    pub async fn add(&self, logbook: &Logbook) -> Result<Uuid> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        let (flight_fields, field_labels) = encode_field_config(logbook)?;
        conn.execute(
            &format!("INSERT INTO logbooks ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
            params![
                logbook.id.to_string(),
                logbook.name,
                logbook.description,
                logbook.created.to_rfc3339(),
                flight_fields,
                field_labels,
            ],
        )
        .map_err(|e| insert_err(e, logbook.id))?;
        Ok(logbook.id)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Logbook>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM logbooks WHERE id = ?1"),
            [id.to_string()],
            row_to_logbook,
        )
        .optional()
        .map_err(Into::into)
    }

    /// All logbooks, in no particular order.
    pub async fn get_all(&self) -> Result<Vec<Logbook>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM logbooks"))?;
        let logbooks = stmt
            .query_map([], row_to_logbook)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(logbooks)
    }

    /// All logbooks ordered by creation time, oldest first.
    pub async fn get_all_by_created(&self) -> Result<Vec<Logbook>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        let mut stmt =
            conn.prepare(&format!("SELECT {COLUMNS} FROM logbooks ORDER BY created"))?;
        let logbooks = stmt
            .query_map([], row_to_logbook)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(logbooks)
    }

    /// Overwrite a logbook (inserting it if absent).
    pub async fn update(&self, logbook: &Logbook) -> Result<()> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        put(&conn, logbook)
    }

    /// Delete a logbook. Refused with `LogbookNotEmpty` while flights still
    /// reference it; deleting an absent id succeeds.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;

        let flights: i64 = conn.query_row(
            "SELECT COUNT(*) FROM flights WHERE logbook_id = ?1",
            [id.to_string()],
            |row| row.get(0),
        )?;
        if flights > 0 {
            return Err(Error::LogbookNotEmpty(id));
        }

        conn.execute("DELETE FROM logbooks WHERE id = ?1", [id.to_string()])?;
        Ok(())
    }
}

/// Put semantics, shared with the bootstrap path.
pub(crate) fn put(conn: &Connection, logbook: &Logbook) -> Result<()> {
    let (flight_fields, field_labels) = encode_field_config(logbook)?;
    conn.execute(
        &format!("INSERT OR REPLACE INTO logbooks ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        params![
            logbook.id.to_string(),
            logbook.name,
            logbook.description,
            logbook.created.to_rfc3339(),
            flight_fields,
            field_labels,
        ],
    )?;
    Ok(())
}

fn encode_field_config(logbook: &Logbook) -> Result<(String, String)> {
    let flight_fields = serde_json::to_string(&logbook.flight_fields)
        .map_err(|e| Error::InvalidRecord(e.to_string()))?;
    let field_labels = serde_json::to_string(&logbook.field_labels)
        .map_err(|e| Error::InvalidRecord(e.to_string()))?;
    Ok((flight_fields, field_labels))
}

fn row_to_logbook(row: &rusqlite::Row) -> rusqlite::Result<Logbook> {
    let id_str: String = row.get(0)?;
    let created_str: String = row.get(3)?;
    let fields_json: String = row.get(4)?;
    let labels_json: String = row.get(5)?;

    let id: Uuid = id_str.parse().map_err(|e| decode_err(0, e))?;
    let created = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| decode_err(3, e))?;
    let flight_fields =
        serde_json::from_str(&fields_json).map_err(|e| decode_err(4, e))?;
    let field_labels =
        serde_json::from_str(&labels_json).map_err(|e| decode_err(5, e))?;

    Ok(Logbook {
        id,
        name: row.get(1)?,
        description: row.get(2)?,
        created,
        flight_fields,
        field_labels,
    })
}
