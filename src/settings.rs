//! Application settings - a singleton record under the fixed key `"default"`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// The one and only settings row key.
pub const SETTINGS_KEY: &str = "default";

/// How durations are displayed throughout the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Units {
    /// Decimal fractions of an hour (1.5 = 1h30)
    DecimalHours,
    /// Hours and minutes (1:30)
    HoursMinutes,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::DecimalHours => "decimalHours",
            Units::HoursMinutes => "hoursMinutes",
        }
    }
}

impl FromStr for Units {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "decimalHours" => Ok(Units::DecimalHours),
            "hoursMinutes" => Ok(Units::HoursMinutes),
            _ => Err(Error::InvalidRecord(format!("Unknown unit system: {}", s))),
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// UI color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(Error::InvalidRecord(format!("Unknown theme: {}", s))),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application-wide settings.
///
/// Created once during bootstrap, mutated by the settings screen, never
/// deleted. `default_logbook_id` is a soft reference; the logbook it points
/// at may have been deleted since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// BCP 47 language tag ("en", "fr", ...)
    pub language: String,
    pub units: Units,
    pub theme: Theme,
    /// Logbook preselected for new flights, if any
    pub default_logbook_id: Option<Uuid>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            units: Units::DecimalHours,
            theme: Theme::Light,
            default_logbook_id: None,
        }
    }
}

impl AppSettings {
    /// Default settings pointing at the given logbook.
    pub fn with_default_logbook(logbook_id: Uuid) -> Self {
        Self {
            default_logbook_id: Some(logbook_id),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.language, "en");
        assert_eq!(settings.units, Units::DecimalHours);
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.default_logbook_id.is_none());
    }

    #[test]
    fn test_units_round_trip() {
        for units in [Units::DecimalHours, Units::HoursMinutes] {
            assert_eq!(units.as_str().parse::<Units>().unwrap(), units);
        }
        assert!("metric".parse::<Units>().is_err());
    }

    #[test]
    fn test_theme_round_trip() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
        }
        assert!("sepia".parse::<Theme>().is_err());
    }
}
