//! [`ReferenceRepo`] — read access to the seeded lookup tables.

use rusqlite::Connection;

use fuelmon_core::{
  id::{FuelTypeId, MakeId},
  reference::{FuelType, Make},
  store::ReferenceRepository,
};

use crate::{Error, Result};

#[derive(Clone, Copy)]
pub struct ReferenceRepo<'a> {
  conn: &'a Connection,
}

impl<'a> ReferenceRepo<'a> {
  pub(crate) fn new(conn: &'a Connection) -> Self { Self { conn } }

  /// `(id, name)` pairs in insertion order. An empty table is corruption.
  fn names(&self, table: &'static str) -> Result<Vec<(i64, String)>> {
    let mut stmt = self
      .conn
      .prepare(&format!("SELECT id, name FROM {table} ORDER BY id"))?;
    let rows = stmt
      .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    if rows.is_empty() {
      return Err(Error::MissingReferenceData(table));
    }
    Ok(rows)
  }
}

impl ReferenceRepository for ReferenceRepo<'_> {
  type Error = Error;

  fn list_fuel_types(&self) -> Result<Vec<FuelType>> {
    Ok(
      self
        .names("fuel_type")?
        .into_iter()
        .map(|(id, name)| FuelType { id: FuelTypeId(id), name })
        .collect(),
    )
  }

  fn list_makes(&self) -> Result<Vec<Make>> {
    Ok(
      self
        .names("make")?
        .into_iter()
        .map(|(id, name)| Make { id: MakeId(id), name })
        .collect(),
    )
  }
}
