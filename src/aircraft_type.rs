//! Aircraft type - a reusable description of an aircraft model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An aircraft model with its handling characteristics.
///
/// Independent of any logbook; flights reference it by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftType {
    pub id: Uuid,
    /// Free-text type designator ("C172", "DR400", ...)
    pub type_designator: String,
    /// ICAO type code
    pub icao: String,
    /// Display name ("Cessna 172 Skyhawk")
    pub name: String,
    pub variable_pitch: bool,
    pub retractable: bool,
    pub multi_engine: bool,
    pub tailwheel: bool,
    pub high_performance: bool,
}

impl AircraftType {
    /// Create a blank aircraft type with a fresh identity.
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            type_designator: String::new(),
            icao: String::new(),
            name: String::new(),
            variable_pitch: false,
            retractable: false,
            multi_engine: false,
            tailwheel: false,
            high_performance: false,
        }
    }

    pub fn new(
        type_designator: impl Into<String>,
        icao: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            type_designator: type_designator.into(),
            icao: icao.into(),
            name: name.into(),
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_defaults() {
        let at = AircraftType::empty();
        assert!(at.icao.is_empty());
        assert!(!at.multi_engine);
    }

    #[test]
    fn test_new_keeps_flags_off() {
        let at = AircraftType::new("C172", "C172", "Cessna 172 Skyhawk");
        assert_eq!(at.name, "Cessna 172 Skyhawk");
        assert!(!at.variable_pitch && !at.retractable && !at.tailwheel);
    }
}
