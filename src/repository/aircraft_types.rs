//! Aircraft types repository.

use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use super::{decode_err, insert_err};
use crate::aircraft_type::AircraftType;
use crate::storage::ConnectionManager;
use crate::Result;

const COLUMNS: &str = "id, type_designator, icao, name, variable_pitch, retractable, \
                       multi_engine, tailwheel, high_performance";

pub struct AircraftTypesRepository {
    manager: ConnectionManager,
}

impl AircraftTypesRepository {
    pub(crate) fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// Insert a new aircraft type. Fails with `DuplicateKey` if the id
    /// exists.
    pub async fn add(&self, aircraft_type: &AircraftType) -> Result<Uuid> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        conn.execute(
            &format!(
                "INSERT INTO aircraft_types ({COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ),
            params![
                aircraft_type.id.to_string(),
                aircraft_type.type_designator,
                aircraft_type.icao,
                aircraft_type.name,
                aircraft_type.variable_pitch,
                aircraft_type.retractable,
                aircraft_type.multi_engine,
                aircraft_type.tailwheel,
                aircraft_type.high_performance,
            ],
        )
        .map_err(|e| insert_err(e, aircraft_type.id))?;
        Ok(aircraft_type.id)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<AircraftType>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM aircraft_types WHERE id = ?1"),
            [id.to_string()],
            row_to_aircraft_type,
        )
        .optional()
        .map_err(Into::into)
    }

    pub async fn get_all(&self) -> Result<Vec<AircraftType>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM aircraft_types"))?;
        let types = stmt
            .query_map([], row_to_aircraft_type)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(types)
    }

    /// Overwrite an aircraft type (inserting it if absent).
    pub async fn update(&self, aircraft_type: &AircraftType) -> Result<()> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO aircraft_types ({COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ),
            params![
                aircraft_type.id.to_string(),
                aircraft_type.type_designator,
                aircraft_type.icao,
                aircraft_type.name,
                aircraft_type.variable_pitch,
                aircraft_type.retractable,
                aircraft_type.multi_engine,
                aircraft_type.tailwheel,
                aircraft_type.high_performance,
            ],
        )?;
        Ok(())
    }

    /// Delete an aircraft type; deleting an absent id succeeds.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        conn.execute("DELETE FROM aircraft_types WHERE id = ?1", [id.to_string()])?;
        Ok(())
    }
}

fn row_to_aircraft_type(row: &rusqlite::Row) -> rusqlite::Result<AircraftType> {
    let id_str: String = row.get(0)?;
    let id: Uuid = id_str.parse().map_err(|e| decode_err(0, e))?;

    Ok(AircraftType {
        id,
        type_designator: row.get(1)?,
        icao: row.get(2)?,
        name: row.get(3)?,
        variable_pitch: row.get(4)?,
        retractable: row.get(5)?,
        multi_engine: row.get(6)?,
        tailwheel: row.get(7)?,
        high_performance: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn repo() -> AircraftTypesRepository {
        AircraftTypesRepository::new(ConnectionManager::in_memory())
    }

    #[tokio::test]
    async fn test_add_and_get_round_trip() {
        let repo = repo();

        let mut at = AircraftType::new("PA28R", "P28R", "Piper Arrow");
        at.variable_pitch = true;
        at.retractable = true;
        repo.add(&at).await.unwrap();

        let loaded = repo.get(at.id).await.unwrap().unwrap();
        assert_eq!(loaded, at);
    }

    #[tokio::test]
    async fn test_add_duplicate_key() {
        let repo = repo();

        let at = AircraftType::new("C172", "C172", "Cessna 172");
        repo.add(&at).await.unwrap();
        let err = repo.add(&at).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn test_update_of_absent_behaves_like_add() {
        let repo = repo();

        let at = AircraftType::new("DA42", "DA42", "Diamond Twin Star");
        repo.update(&at).await.unwrap();
        assert_eq!(repo.get(at.id).await.unwrap().unwrap().name, "Diamond Twin Star");
    }

    #[tokio::test]
    async fn test_get_all_and_delete_idempotent() {
        let repo = repo();

        let a = AircraftType::new("C152", "C152", "Cessna 152");
        let b = AircraftType::new("DR40", "DR40", "Robin DR400");
        repo.add(&a).await.unwrap();
        repo.add(&b).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap().len(), 2);

        repo.delete(a.id).await.unwrap();
        repo.delete(a.id).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
        assert!(repo.get(a.id).await.unwrap().is_none());
    }
}
