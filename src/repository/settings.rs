//! Settings repository - reads and writes the singleton settings row.

use rusqlite::{Connection, OptionalExtension, params};

use super::decode_err;
use crate::settings::{AppSettings, SETTINGS_KEY};
use crate::storage::ConnectionManager;
use crate::{Error, Result};

pub struct SettingsRepository {
    manager: ConnectionManager,
}

impl SettingsRepository {
    pub(crate) fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// The application settings, or `None` on a store that has not been
    /// bootstrapped yet.
    pub async fn get(&self) -> Result<Option<AppSettings>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        select(&conn)
    }

    /// Overwrite the settings row (inserting it if absent).
    pub async fn update(&self, settings: &AppSettings) -> Result<()> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        put(&conn, settings)
    }
}

pub(crate) fn select(conn: &Connection) -> Result<Option<AppSettings>> {
    conn.query_row(
        "SELECT language, units, theme, default_logbook_id FROM app_settings WHERE id = ?1",
        [SETTINGS_KEY],
        row_to_settings,
    )
    .optional()
    .map_err(Into::into)
}

pub(crate) fn put(conn: &Connection, settings: &AppSettings) -> Result<()> {
    conn.execute(
        r#"
        INSERT OR REPLACE INTO app_settings (id, language, units, theme, default_logbook_id)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            SETTINGS_KEY,
            settings.language,
            settings.units.as_str(),
            settings.theme.as_str(),
            settings.default_logbook_id.map(|id| id.to_string()),
        ],
    )?;
    Ok(())
}

fn row_to_settings(row: &rusqlite::Row) -> rusqlite::Result<AppSettings> {
    let units_str: String = row.get(1)?;
    let theme_str: String = row.get(2)?;
    let default_id: Option<String> = row.get(3)?;

    let units = units_str.parse().map_err(|e: Error| decode_err(1, e))?;
    let theme = theme_str.parse().map_err(|e: Error| decode_err(2, e))?;
    let default_logbook_id = default_id
        .map(|s| s.parse::<uuid::Uuid>().map_err(|e| decode_err(3, e)))
        .transpose()?;

    Ok(AppSettings {
        language: row.get(0)?,
        units,
        theme,
        default_logbook_id,
    })
}
