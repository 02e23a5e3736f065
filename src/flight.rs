//! Flight record - one logbook entry.
//!
//! Times are decimal hours. Which of the optional attributes the UI shows
//! is governed by the owning logbook's [`FlightFields`](crate::FlightFields)
//! configuration; the record itself always carries every column.

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single flight.
///
/// `id` is assigned by the storage engine on insert and stays `None` until
/// then. `logbook_id` must reference an existing logbook; the store does not
/// enforce this at write time, but refuses to delete a logbook that still
/// has flights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: Option<i64>,
    pub logbook_id: Uuid,
    pub date: NaiveDate,
    /// Typed reference into the aircraft-types collection
    pub aircraft_type_id: Option<Uuid>,
    pub aircraft_registration: String,
    /// Departure aerodrome (ICAO code or free text)
    pub departure: String,
    /// Arrival aerodrome
    pub arrival: String,
    pub departure_time: Option<NaiveTime>,
    pub arrival_time: Option<NaiveTime>,
    /// Total block time in decimal hours; never negative
    pub time_total: f64,
    pub time_pic: f64,
    pub time_dual_instructed: f64,
    pub time_dual_received: f64,
    pub time_solo_supervised: f64,
    pub time_night: f64,
    pub time_cross_country: f64,
    pub time_ifr_simulated: f64,
    pub time_ifr_actual: f64,
    pub time_custom1: f64,
    pub time_custom2: f64,
    pub landings_day: u32,
    pub landings_night: u32,
    pub counter_custom1: u32,
    pub counter_custom2: u32,
    pub remarks: String,
}

impl Flight {
    /// Create a blank flight in the given logbook, dated today, with all
    /// times and counters zeroed.
    pub fn empty(logbook_id: Uuid) -> Self {
        Self {
            id: None,
            logbook_id,
            date: Utc::now().date_naive(),
            aircraft_type_id: None,
            aircraft_registration: String::new(),
            departure: String::new(),
            arrival: String::new(),
            departure_time: None,
            arrival_time: None,
            time_total: 0.0,
            time_pic: 0.0,
            time_dual_instructed: 0.0,
            time_dual_received: 0.0,
            time_solo_supervised: 0.0,
            time_night: 0.0,
            time_cross_country: 0.0,
            time_ifr_simulated: 0.0,
            time_ifr_actual: 0.0,
            time_custom1: 0.0,
            time_custom2: 0.0,
            landings_day: 0,
            landings_night: 0,
            counter_custom1: 0,
            counter_custom2: 0,
            remarks: String::new(),
        }
    }
}
