//! Database schema definitions
//!
//! Purely descriptive: tables, indexes and the current schema version.
//! Every statement is guarded by IF NOT EXISTS so upgrades are additive and
//! safe to re-run against a store that already has some of the objects.

/// Current schema version, written to `PRAGMA user_version` after upgrade.
pub const SCHEMA_VERSION: i32 = 1;

/// SQL to create the app_settings table (singleton row, caller-supplied key)
pub const CREATE_APP_SETTINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS app_settings (
    id TEXT PRIMARY KEY,
    language TEXT NOT NULL,
    units TEXT NOT NULL,
    theme TEXT NOT NULL,
    default_logbook_id TEXT
)
"#;

/// SQL to create the aircraft_types table
pub const CREATE_AIRCRAFT_TYPES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS aircraft_types (
    id TEXT PRIMARY KEY,
    type_designator TEXT NOT NULL,
    icao TEXT NOT NULL,
    name TEXT NOT NULL,
    variable_pitch INTEGER NOT NULL DEFAULT 0,
    retractable INTEGER NOT NULL DEFAULT 0,
    multi_engine INTEGER NOT NULL DEFAULT 0,
    tailwheel INTEGER NOT NULL DEFAULT 0,
    high_performance INTEGER NOT NULL DEFAULT 0
)
"#;

/// SQL to create the logbooks table
/// flight_fields and field_labels hold the per-logbook field configuration
/// as JSON so new toggles do not require a schema change
pub const CREATE_LOGBOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS logbooks (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    created TEXT NOT NULL,
    flight_fields TEXT NOT NULL,
    field_labels TEXT NOT NULL
)
"#;

/// SQL to create the flights table (engine-assigned increasing key)
pub const CREATE_FLIGHTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS flights (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    logbook_id TEXT NOT NULL,
    date TEXT NOT NULL,
    aircraft_type_id TEXT,
    aircraft_registration TEXT NOT NULL,
    departure TEXT NOT NULL,
    arrival TEXT NOT NULL,
    departure_time TEXT,
    arrival_time TEXT,
    time_total REAL NOT NULL DEFAULT 0,
    time_pic REAL NOT NULL DEFAULT 0,
    time_dual_instructed REAL NOT NULL DEFAULT 0,
    time_dual_received REAL NOT NULL DEFAULT 0,
    time_solo_supervised REAL NOT NULL DEFAULT 0,
    time_night REAL NOT NULL DEFAULT 0,
    time_cross_country REAL NOT NULL DEFAULT 0,
    time_ifr_simulated REAL NOT NULL DEFAULT 0,
    time_ifr_actual REAL NOT NULL DEFAULT 0,
    time_custom1 REAL NOT NULL DEFAULT 0,
    time_custom2 REAL NOT NULL DEFAULT 0,
    landings_day INTEGER NOT NULL DEFAULT 0,
    landings_night INTEGER NOT NULL DEFAULT 0,
    counter_custom1 INTEGER NOT NULL DEFAULT 0,
    counter_custom2 INTEGER NOT NULL DEFAULT 0,
    remarks TEXT NOT NULL DEFAULT ''
)
"#;

/// SQL to create secondary indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_logbooks_created ON logbooks(created)",
    "CREATE INDEX IF NOT EXISTS idx_flights_logbook ON flights(logbook_id)",
    "CREATE INDEX IF NOT EXISTS idx_flights_date ON flights(date)",
    "CREATE INDEX IF NOT EXISTS idx_flights_aircraft_type ON flights(aircraft_type_id)",
    "CREATE INDEX IF NOT EXISTS idx_flights_logbook_date ON flights(logbook_id, date)",
];

/// All schema creation statements, tables first
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_APP_SETTINGS_TABLE,
        CREATE_AIRCRAFT_TYPES_TABLE,
        CREATE_LOGBOOKS_TABLE,
        CREATE_FLIGHTS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
