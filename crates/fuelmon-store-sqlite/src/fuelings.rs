//! [`FuelingRepo`] — fueling CRUD and the odometer floor.

use rusqlite::{Connection, OptionalExtension as _, params};
use tracing::debug;

use fuelmon_core::{
  fueling::{Fueling, FuelingSummary, NewFueling},
  id::{FuelingId, VehicleId},
  store::FuelingRepository,
};

use crate::{
  Error, Result,
  encode::{RawFueling, encode_date},
};

/// Baseline odometer of the vehicle, raised by the highest reading among its
/// fuelings (optionally only those recorded before a given fueling id).
const MINIMUM_ODOMETER: &str = "
SELECT MAX(
         v.odometer_km,
         COALESCE(
           (SELECT MAX(f.odometer_km)
            FROM fueling f
            WHERE f.vehicle_id = v.id AND (?2 IS NULL OR f.id < ?2)),
           0))
FROM vehicle v
WHERE v.id = ?1";

/// Lowest reading among fuelings recorded after a given fueling id.
const NEXT_ODOMETER: &str = "
SELECT MIN(odometer_km) FROM fueling WHERE vehicle_id = ?1 AND id > ?2";

#[derive(Clone, Copy)]
pub struct FuelingRepo<'a> {
  conn: &'a Connection,
}

impl<'a> FuelingRepo<'a> {
  pub(crate) fn new(conn: &'a Connection) -> Self { Self { conn } }

  fn minimum(&self, vehicle_id: VehicleId, before: Option<FuelingId>) -> Result<u32> {
    let minimum: Option<u32> = self
      .conn
      .query_row(
        MINIMUM_ODOMETER,
        params![vehicle_id.get(), before.map(FuelingId::get)],
        |r| r.get(0),
      )
      .optional()?;
    Ok(minimum.unwrap_or(0))
  }
}

impl FuelingRepository for FuelingRepo<'_> {
  type Error = Error;

  fn minimum_allowed_odometer(&self, vehicle_id: VehicleId) -> Result<u32> {
    self.minimum(vehicle_id, None)
  }

  fn minimum_allowed_odometer_before(
    &self,
    vehicle_id: VehicleId,
    before: FuelingId,
  ) -> Result<u32> {
    self.minimum(vehicle_id, Some(before))
  }

  fn next_recorded_odometer_after(
    &self,
    vehicle_id: VehicleId,
    after: FuelingId,
  ) -> Result<Option<u32>> {
    let next: Option<u32> = self.conn.query_row(
      NEXT_ODOMETER,
      params![vehicle_id.get(), after.get()],
      |r| r.get(0),
    )?;
    Ok(next)
  }

  fn create(&self, input: &NewFueling) -> Result<FuelingId> {
    self.conn.execute(
      "INSERT INTO fueling (
         date, odometer_km, fuel_station, quantity, cost,
         course_type_city, course_type_road, course_type_freeway,
         driving_style, vehicle_id
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
      params![
        encode_date(input.date),
        input.odometer_km,
        input.fuel_station,
        input.quantity,
        input.cost,
        input.course.city,
        input.course.road,
        input.course.freeway,
        input.driving_style.code(),
        input.vehicle_id.get(),
      ],
    )?;

    let id = FuelingId(self.conn.last_insert_rowid());
    debug!(%id, vehicle_id = %input.vehicle_id, "fueling created");
    Ok(id)
  }

  fn update(&self, id: FuelingId, input: &NewFueling) -> Result<usize> {
    let changed = self.conn.execute(
      "UPDATE fueling
       SET date = ?2, odometer_km = ?3, fuel_station = ?4, quantity = ?5, cost = ?6,
           course_type_city = ?7, course_type_road = ?8, course_type_freeway = ?9,
           driving_style = ?10, vehicle_id = ?11
       WHERE id = ?1",
      params![
        id.get(),
        encode_date(input.date),
        input.odometer_km,
        input.fuel_station,
        input.quantity,
        input.cost,
        input.course.city,
        input.course.road,
        input.course.freeway,
        input.driving_style.code(),
        input.vehicle_id.get(),
      ],
    )?;
    debug!(%id, changed, "fueling updated");
    Ok(changed)
  }

  fn delete(&self, id: FuelingId) -> Result<bool> {
    let removed = self
      .conn
      .execute("DELETE FROM fueling WHERE id = ?1", params![id.get()])?;
    debug!(%id, removed, "fueling deleted");
    Ok(removed > 0)
  }

  fn get(&self, id: FuelingId) -> Result<Option<Fueling>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {} FROM fueling WHERE id = ?1", RawFueling::COLUMNS),
        params![id.get()],
        RawFueling::from_row,
      )
      .optional()?;
    raw.map(RawFueling::into_fueling).transpose()
  }

  fn list_by_vehicle(&self, vehicle_id: VehicleId) -> Result<Vec<FuelingSummary>> {
    let mut stmt = self.conn.prepare(
      "SELECT id, quantity, cost FROM fueling WHERE vehicle_id = ?1 ORDER BY id",
    )?;
    let rows = stmt
      .query_map(params![vehicle_id.get()], |row| {
        Ok(FuelingSummary {
          id:       FuelingId(row.get(0)?),
          quantity: row.get(1)?,
          cost:     row.get(2)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  fn last_fueling_vehicle(&self) -> Result<Option<VehicleId>> {
    let id: Option<i64> = self
      .conn
      .query_row(
        "SELECT vehicle_id FROM fueling ORDER BY id DESC LIMIT 1",
        [],
        |r| r.get(0),
      )
      .optional()?;
    Ok(id.map(VehicleId))
  }
}
