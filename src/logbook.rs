//! Logbook types - a named container grouping a pilot's flights.
//!
//! Flights reference exactly one logbook. Each logbook carries its own
//! field-visibility configuration controlling which optional flight
//! attributes it tracks, plus display labels for the custom slots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-logbook visibility toggles for the optional flight attributes.
///
/// Persisted as a JSON column so that new toggles can be added without a
/// schema migration; missing fields fall back to these defaults on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlightFields {
    pub time_dual_instructed: bool,
    pub time_dual_received: bool,
    pub time_solo_supervised: bool,
    pub time_night: bool,
    pub time_ifr_simulated: bool,
    pub time_ifr_actual: bool,
    pub time_custom1: bool,
    pub time_custom2: bool,
    pub counter_custom1: bool,
    pub counter_custom2: bool,
}

impl Default for FlightFields {
    fn default() -> Self {
        Self {
            time_dual_instructed: false,
            time_dual_received: true,
            time_solo_supervised: true,
            time_night: true,
            time_ifr_simulated: false,
            time_ifr_actual: false,
            time_custom1: false,
            time_custom2: false,
            counter_custom1: false,
            counter_custom2: false,
        }
    }
}

/// Display labels for the custom time and counter slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldLabels {
    pub time_custom1: String,
    pub time_custom2: String,
    pub counter_custom1: String,
    pub counter_custom2: String,
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            time_custom1: "Custom time 1".to_string(),
            time_custom2: "Custom time 2".to_string(),
            counter_custom1: "Custom counter 1".to_string(),
            counter_custom2: "Custom counter 2".to_string(),
        }
    }
}

/// A named container grouping flights.
///
/// `id` is globally unique and immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logbook {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub flight_fields: FlightFields,
    pub field_labels: FieldLabels,
}

impl Logbook {
    /// Create a minimally valid logbook with a fresh identity and the
    /// current timestamp.
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: String::new(),
            created: Utc::now(),
            flight_fields: FlightFields::default(),
            field_labels: FieldLabels::default(),
        }
    }

    /// Create a named logbook with default field configuration.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_generates_identity() {
        let a = Logbook::empty();
        let b = Logbook::empty();
        assert_ne!(a.id, b.id);
        assert!(a.name.is_empty());
    }

    #[test]
    fn test_new_fills_defaults() {
        let logbook = Logbook::new("Glider hours", "");
        assert_eq!(logbook.name, "Glider hours");
        assert!(logbook.flight_fields.time_night);
        assert!(!logbook.flight_fields.time_ifr_actual);
        assert_eq!(logbook.field_labels.time_custom1, "Custom time 1");
    }

    #[test]
    fn test_flight_fields_tolerates_missing_json_keys() {
        // Older rows may predate newer toggles; serde(default) fills them in.
        let fields: FlightFields = serde_json::from_str(r#"{"timeNight":false}"#).unwrap();
        assert!(!fields.time_night);
        assert!(fields.time_dual_received);
    }
}
