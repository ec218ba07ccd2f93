//! Conversions between domain types and the plain values stored in SQLite
//! columns.
//!
//! Dates are `YYYY-MM-DD` text, course-type flags are 0/1 integers and the
//! driving style is its integer code.

use chrono::NaiveDate;
use fuelmon_core::{
  fueling::{CourseTypes, DrivingStyle, Fueling},
  id::{FuelTypeId, FuelingId, MakeId, VehicleId},
  vehicle::Vehicle,
};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Values read directly from a `vehicle` row.
pub struct RawVehicle {
  pub id:            i64,
  pub make_id:       i64,
  pub model:         String,
  pub fuel_type_id:  Option<i64>,
  pub fuel_capacity: u32,
  pub registration:  String,
  pub year:          u16,
  pub odometer_km:   u32,
}

impl RawVehicle {
  pub const COLUMNS: &'static str =
    "id, make_id, model, fuel_type_id, fuel_capacity, registration, year, odometer_km";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      make_id:       row.get(1)?,
      model:         row.get(2)?,
      fuel_type_id:  row.get(3)?,
      fuel_capacity: row.get(4)?,
      registration:  row.get(5)?,
      year:          row.get(6)?,
      odometer_km:   row.get(7)?,
    })
  }

  pub fn into_vehicle(self) -> Vehicle {
    Vehicle {
      id:            VehicleId(self.id),
      make_id:       MakeId(self.make_id),
      model:         self.model,
      fuel_type_id:  self.fuel_type_id.map(FuelTypeId),
      fuel_capacity: self.fuel_capacity,
      registration:  self.registration,
      year:          self.year,
      odometer_km:   self.odometer_km,
    }
  }
}

/// Values read directly from a `fueling` row.
pub struct RawFueling {
  pub id:            i64,
  pub vehicle_id:    i64,
  pub date:          String,
  pub odometer_km:   u32,
  pub fuel_station:  String,
  pub quantity:      f64,
  pub cost:          f64,
  pub city:          bool,
  pub road:          bool,
  pub freeway:       bool,
  pub driving_style: i64,
}

impl RawFueling {
  pub const COLUMNS: &'static str = "id, vehicle_id, date, odometer_km, fuel_station, quantity, \
                                     cost, course_type_city, course_type_road, \
                                     course_type_freeway, driving_style";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      vehicle_id:    row.get(1)?,
      date:          row.get(2)?,
      odometer_km:   row.get(3)?,
      fuel_station:  row.get(4)?,
      quantity:      row.get(5)?,
      cost:          row.get(6)?,
      city:          row.get(7)?,
      road:          row.get(8)?,
      freeway:       row.get(9)?,
      driving_style: row.get(10)?,
    })
  }

  pub fn into_fueling(self) -> Result<Fueling> {
    Ok(Fueling {
      id:            FuelingId(self.id),
      vehicle_id:    VehicleId(self.vehicle_id),
      date:          decode_date(&self.date)?,
      odometer_km:   self.odometer_km,
      fuel_station:  self.fuel_station,
      quantity:      self.quantity,
      cost:          self.cost,
      course:        CourseTypes::new(self.city, self.road, self.freeway),
      driving_style: DrivingStyle::from_code(self.driving_style)?,
    })
  }
}
