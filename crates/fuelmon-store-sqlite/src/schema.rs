//! SQL schema for the fuel monitor store.
//!
//! The schema version lives in `PRAGMA user_version`. There is a single
//! generation of the schema: any stored version other than the current one
//! is handled by [`upgrade`], which throws all data away and starts over.

use rusqlite::{Connection, params};
use tracing::{info, warn};

use fuelmon_core::reference::SeedData;

use crate::Result;

/// Version written to `user_version` once the tables exist.
pub const SCHEMA_VERSION: i64 = 1;

const CREATE: &str = "
CREATE TABLE fuel_type (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL UNIQUE
);

CREATE TABLE make (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL UNIQUE
);

-- A conflicting registration makes the INSERT a silent no-op.
CREATE TABLE vehicle (
    id             INTEGER PRIMARY KEY,
    odometer_km    INTEGER NOT NULL,
    year           INTEGER NOT NULL,
    fuel_capacity  INTEGER NOT NULL,
    registration   TEXT    NOT NULL UNIQUE ON CONFLICT IGNORE,
    model          TEXT    NOT NULL,
    make_id        INTEGER NOT NULL REFERENCES make(id),
    fuel_type_id   INTEGER REFERENCES fuel_type(id)
);

CREATE TABLE fueling (
    id                   INTEGER PRIMARY KEY,
    date                 TEXT    NOT NULL,   -- YYYY-MM-DD
    odometer_km          INTEGER NOT NULL,
    fuel_station         TEXT    NOT NULL,
    quantity             REAL    NOT NULL,
    cost                 REAL    NOT NULL,
    course_type_city     INTEGER NOT NULL,   -- 0 | 1
    course_type_road     INTEGER NOT NULL,
    course_type_freeway  INTEGER NOT NULL,
    driving_style        INTEGER NOT NULL,   -- DrivingStyle::code()
    vehicle_id           INTEGER NOT NULL REFERENCES vehicle(id) ON DELETE CASCADE
);

CREATE INDEX fueling_vehicle_idx ON fueling(vehicle_id);
";

// `model` is a table name from an earlier draft of the schema; it is dropped
// so that stale files come back clean.
const DROP: &str = "
DROP TABLE IF EXISTS fueling;
DROP TABLE IF EXISTS vehicle;
DROP TABLE IF EXISTS model;
DROP TABLE IF EXISTS make;
DROP TABLE IF EXISTS fuel_type;
";

/// Create every table, seed the reference data and stamp the version.
///
/// Must run inside a transaction on a database that has no tables yet.
pub fn create(conn: &Connection, seed: &SeedData) -> Result<()> {
  info!("creating schema version {SCHEMA_VERSION}");
  conn.execute_batch(CREATE)?;

  let fuel_types = insert_names(conn, "fuel_type", &seed.fuel_types)?;
  let makes = insert_names(conn, "make", &seed.makes)?;
  info!(fuel_types, makes, "seeded reference data");

  conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
  Ok(())
}

/// Destructive upgrade: drop every table and recreate it empty, reseeding
/// reference data. All vehicles and fuelings are lost.
pub fn upgrade(conn: &Connection, from: i64, to: i64, seed: &SeedData) -> Result<()> {
  warn!(from, to, "upgrading database schema, which will destroy all existing data");
  conn.execute_batch(DROP)?;
  create(conn, seed)
}

/// Insert each non-blank, not-yet-seen name. Returns how many rows landed.
fn insert_names(conn: &Connection, table: &str, names: &[String]) -> Result<usize> {
  let mut stmt = conn.prepare(&format!("INSERT OR IGNORE INTO {table} (name) VALUES (?1)"))?;
  let mut inserted = 0;
  for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
    inserted += stmt.execute(params![name])?;
  }
  Ok(inserted)
}
