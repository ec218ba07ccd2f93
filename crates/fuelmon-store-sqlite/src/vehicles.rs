//! [`VehicleRepo`] — vehicle CRUD.

use rusqlite::{Connection, OptionalExtension as _, params};
use tracing::debug;

use fuelmon_core::{
  id::VehicleId,
  store::VehicleRepository,
  vehicle::{NewVehicle, Vehicle, VehicleInsert, VehicleSummary},
};

use crate::{Error, Result, encode::RawVehicle};

#[derive(Clone, Copy)]
pub struct VehicleRepo<'a> {
  conn: &'a Connection,
}

impl<'a> VehicleRepo<'a> {
  pub(crate) fn new(conn: &'a Connection) -> Self { Self { conn } }
}

impl VehicleRepository for VehicleRepo<'_> {
  type Error = Error;

  fn create(&self, input: &NewVehicle) -> Result<VehicleInsert> {
    let inserted = self.conn.execute(
      "INSERT INTO vehicle (
         make_id, model, fuel_type_id, fuel_capacity, registration, year, odometer_km
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
      params![
        input.make_id.get(),
        input.model,
        input.fuel_type_id.map(|id| id.get()),
        input.fuel_capacity,
        input.registration,
        input.year,
        input.odometer_km,
      ],
    )?;

    // The registration column resolves conflicts with IGNORE: no row, no
    // error, zero changes.
    if inserted == 0 {
      debug!(registration = %input.registration, "duplicate registration ignored");
      return Ok(VehicleInsert::DuplicateRegistration);
    }

    let id = VehicleId(self.conn.last_insert_rowid());
    debug!(%id, "vehicle created");
    Ok(VehicleInsert::Created(id))
  }

  fn update(&self, id: VehicleId, input: &NewVehicle) -> Result<usize> {
    let changed = self.conn.execute(
      "UPDATE vehicle
       SET make_id = ?2, model = ?3, fuel_type_id = ?4, fuel_capacity = ?5,
           registration = ?6, year = ?7, odometer_km = ?8
       WHERE id = ?1",
      params![
        id.get(),
        input.make_id.get(),
        input.model,
        input.fuel_type_id.map(|id| id.get()),
        input.fuel_capacity,
        input.registration,
        input.year,
        input.odometer_km,
      ],
    )?;
    debug!(%id, changed, "vehicle updated");
    Ok(changed)
  }

  fn delete(&self, id: VehicleId) -> Result<bool> {
    // Fuelings go with it through ON DELETE CASCADE.
    let removed = self
      .conn
      .execute("DELETE FROM vehicle WHERE id = ?1", params![id.get()])?;
    debug!(%id, removed, "vehicle deleted");
    Ok(removed > 0)
  }

  fn get(&self, id: VehicleId) -> Result<Option<Vehicle>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {} FROM vehicle WHERE id = ?1", RawVehicle::COLUMNS),
        params![id.get()],
        RawVehicle::from_row,
      )
      .optional()?;
    Ok(raw.map(RawVehicle::into_vehicle))
  }

  fn list(&self) -> Result<Vec<VehicleSummary>> {
    let mut stmt = self.conn.prepare(
      "SELECT v.id, v.model, m.name, v.registration
       FROM vehicle v
       JOIN make m ON m.id = v.make_id
       ORDER BY v.id",
    )?;
    let rows = stmt
      .query_map([], |row| {
        Ok(VehicleSummary {
          id:           VehicleId(row.get(0)?),
          model:        row.get(1)?,
          make_name:    row.get(2)?,
          registration: row.get(3)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .query_row("SELECT COUNT(*) FROM vehicle", [], |r| r.get(0))?;
    u64::try_from(n)
      .map_err(|_| Error::Database(rusqlite::Error::IntegralValueOutOfRange(0, n)))
  }

  fn registration(&self, id: VehicleId) -> Result<Option<String>> {
    Ok(
      self
        .conn
        .query_row(
          "SELECT registration FROM vehicle WHERE id = ?1",
          params![id.get()],
          |r| r.get(0),
        )
        .optional()?,
    )
  }
}
