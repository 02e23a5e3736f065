//! Flights repository.
//!
//! Keys are engine-assigned increasing integers, handed back from `add`.
//! `logbook_id` is not validated against the logbooks collection at write
//! time; the delete side (see `LogbooksRepository::delete`) is what keeps
//! the reference consistent.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Value;
use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use super::{decode_err, insert_err};
use crate::flight::Flight;
use crate::storage::ConnectionManager;
use crate::Result;

const COLUMNS: &str = "id, logbook_id, date, aircraft_type_id, aircraft_registration, \
                       departure, arrival, departure_time, arrival_time, \
                       time_total, time_pic, time_dual_instructed, time_dual_received, \
                       time_solo_supervised, time_night, time_cross_country, \
                       time_ifr_simulated, time_ifr_actual, time_custom1, time_custom2, \
                       landings_day, landings_night, counter_custom1, counter_custom2, \
                       remarks";

const PLACEHOLDERS: &str = "?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, \
                            ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25";

pub struct FlightsRepository {
    manager: ConnectionManager,
}

impl FlightsRepository {
    pub(crate) fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// Insert a flight and return its key. With `flight.id == None` the
    /// engine assigns the next key; an explicit id that already exists
    /// fails with `DuplicateKey`.
    pub async fn add(&self, flight: &Flight) -> Result<i64> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        conn.execute(
            &format!("INSERT INTO flights ({COLUMNS}) VALUES ({PLACEHOLDERS})"),
            rusqlite::params_from_iter(bind(flight)),
        )
        .map_err(|e| match flight.id {
            Some(id) => insert_err(e, id),
            None => e.into(),
        })?;
        Ok(conn.last_insert_rowid())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Flight>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM flights WHERE id = ?1"),
            [id],
            row_to_flight,
        )
        .optional()
        .map_err(Into::into)
    }

    pub async fn get_all(&self) -> Result<Vec<Flight>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM flights"))?;
        let flights = stmt
            .query_map([], row_to_flight)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(flights)
    }

    /// All flights in one logbook, time-ordered.
    pub async fn get_by_logbook(&self, logbook_id: Uuid) -> Result<Vec<Flight>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM flights WHERE logbook_id = ?1 ORDER BY date"
        ))?;
        let flights = stmt
            .query_map([logbook_id.to_string()], row_to_flight)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(flights)
    }

    /// Flights in one logbook within `[from, to]`, time-ordered.
    pub async fn get_by_logbook_and_date_range(
        &self,
        logbook_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Flight>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM flights \
             WHERE logbook_id = ?1 AND date BETWEEN ?2 AND ?3 ORDER BY date"
        ))?;
        let flights = stmt
            .query_map(
                params![logbook_id.to_string(), from.to_string(), to.to_string()],
                row_to_flight,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(flights)
    }

    pub async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Flight>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        let mut stmt =
            conn.prepare(&format!("SELECT {COLUMNS} FROM flights WHERE date = ?1"))?;
        let flights = stmt
            .query_map([date.to_string()], row_to_flight)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(flights)
    }

    pub async fn get_by_aircraft_type(&self, aircraft_type_id: Uuid) -> Result<Vec<Flight>> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM flights WHERE aircraft_type_id = ?1"
        ))?;
        let flights = stmt
            .query_map([aircraft_type_id.to_string()], row_to_flight)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(flights)
    }

    /// Overwrite a flight (inserting it if absent). A flight without an id
    /// is inserted under a fresh engine-assigned key.
    pub async fn update(&self, flight: &Flight) -> Result<()> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        conn.execute(
            &format!("INSERT OR REPLACE INTO flights ({COLUMNS}) VALUES ({PLACEHOLDERS})"),
            rusqlite::params_from_iter(bind(flight)),
        )?;
        Ok(())
    }

    /// Delete a flight; deleting an absent key succeeds.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        conn.execute("DELETE FROM flights WHERE id = ?1", [id])?;
        Ok(())
    }

    /// Sum of `time_total` over all flights, or over one logbook.
    ///
    /// Recomputed from the rows on every call; there is no cached aggregate
    /// to go stale.
    pub async fn total_flight_time(&self, logbook_id: Option<Uuid>) -> Result<f64> {
        let handle = self.manager.handle().await?;
        let conn = handle.lock().await;
        let total = match logbook_id {
            Some(id) => conn.query_row(
                "SELECT COALESCE(SUM(time_total), 0) FROM flights WHERE logbook_id = ?1",
                [id.to_string()],
                |row| row.get(0),
            )?,
            None => conn.query_row(
                "SELECT COALESCE(SUM(time_total), 0) FROM flights",
                [],
                |row| row.get(0),
            )?,
        };
        Ok(total)
    }
}

/// Column values in `COLUMNS` order.
fn bind(flight: &Flight) -> Vec<Value> {
    vec![
        flight.id.into(),
        flight.logbook_id.to_string().into(),
        flight.date.to_string().into(),
        flight.aircraft_type_id.map(|id| id.to_string()).into(),
        flight.aircraft_registration.clone().into(),
        flight.departure.clone().into(),
        flight.arrival.clone().into(),
        flight.departure_time.map(|t| t.to_string()).into(),
        flight.arrival_time.map(|t| t.to_string()).into(),
        flight.time_total.into(),
        flight.time_pic.into(),
        flight.time_dual_instructed.into(),
        flight.time_dual_received.into(),
        flight.time_solo_supervised.into(),
        flight.time_night.into(),
        flight.time_cross_country.into(),
        flight.time_ifr_simulated.into(),
        flight.time_ifr_actual.into(),
        flight.time_custom1.into(),
        flight.time_custom2.into(),
        flight.landings_day.into(),
        flight.landings_night.into(),
        flight.counter_custom1.into(),
        flight.counter_custom2.into(),
        flight.remarks.clone().into(),
    ]
}

fn row_to_flight(row: &rusqlite::Row) -> rusqlite::Result<Flight> {
    let logbook_str: String = row.get(1)?;
    let date_str: String = row.get(2)?;
    let type_str: Option<String> = row.get(3)?;
    let dep_time_str: Option<String> = row.get(7)?;
    let arr_time_str: Option<String> = row.get(8)?;

    let logbook_id: Uuid = logbook_str.parse().map_err(|e| decode_err(1, e))?;
    let date: NaiveDate = date_str.parse().map_err(|e| decode_err(2, e))?;
    let aircraft_type_id = type_str
        .map(|s| s.parse::<Uuid>().map_err(|e| decode_err(3, e)))
        .transpose()?;
    let departure_time = dep_time_str
        .map(|s| s.parse::<NaiveTime>().map_err(|e| decode_err(7, e)))
        .transpose()?;
    let arrival_time = arr_time_str
        .map(|s| s.parse::<NaiveTime>().map_err(|e| decode_err(8, e)))
        .transpose()?;

    Ok(Flight {
        id: row.get(0)?,
        logbook_id,
        date,
        aircraft_type_id,
        aircraft_registration: row.get(4)?,
        departure: row.get(5)?,
        arrival: row.get(6)?,
        departure_time,
        arrival_time,
        time_total: row.get(9)?,
        time_pic: row.get(10)?,
        time_dual_instructed: row.get(11)?,
        time_dual_received: row.get(12)?,
        time_solo_supervised: row.get(13)?,
        time_night: row.get(14)?,
        time_cross_country: row.get(15)?,
        time_ifr_simulated: row.get(16)?,
        time_ifr_actual: row.get(17)?,
        time_custom1: row.get(18)?,
        time_custom2: row.get(19)?,
        landings_day: row.get(20)?,
        landings_night: row.get(21)?,
        counter_custom1: row.get(22)?,
        counter_custom2: row.get(23)?,
        remarks: row.get(24)?,
    })
}
