//! Fueling events recorded against a vehicle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
  Error, Result,
  id::{FuelingId, VehicleId},
};

// ─── Course types ────────────────────────────────────────────────────────────

/// Driving conditions since the previous fueling. Non-exclusive; at least one
/// flag must be set for an entry to be accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseTypes {
  pub city:    bool,
  pub road:    bool,
  pub freeway: bool,
}

impl CourseTypes {
  pub fn new(city: bool, road: bool, freeway: bool) -> Self {
    Self { city, road, freeway }
  }

  pub fn any(self) -> bool { self.city || self.road || self.freeway }
}

// ─── Driving style ───────────────────────────────────────────────────────────

/// How the vehicle was driven. Persisted as its integer code.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DrivingStyle {
  Calm,
  #[default]
  Normal,
  Aggressive,
}

impl DrivingStyle {
  /// Stable code stored in the `drivingStyle` column, starting at 1.
  pub fn code(self) -> i64 {
    match self {
      Self::Calm => 1,
      Self::Normal => 2,
      Self::Aggressive => 3,
    }
  }

  pub fn from_code(code: i64) -> Result<Self> {
    match code {
      1 => Ok(Self::Calm),
      2 => Ok(Self::Normal),
      3 => Ok(Self::Aggressive),
      other => Err(Error::UnknownDrivingStyle(other)),
    }
  }
}

// ─── Fueling ─────────────────────────────────────────────────────────────────

/// A persisted fueling row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fueling {
  pub id:            FuelingId,
  pub vehicle_id:    VehicleId,
  pub date:          NaiveDate,
  pub odometer_km:   u32,
  pub fuel_station:  String,
  /// Litres.
  pub quantity:      f64,
  pub cost:          f64,
  pub course:        CourseTypes,
  pub driving_style: DrivingStyle,
}

/// Input for recording or editing a fueling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFueling {
  pub vehicle_id:    VehicleId,
  pub date:          NaiveDate,
  pub odometer_km:   u32,
  pub fuel_station:  String,
  pub quantity:      f64,
  pub cost:          f64,
  pub course:        CourseTypes,
  pub driving_style: DrivingStyle,
}

impl NewFueling {
  pub fn into_fueling(self, id: FuelingId) -> Fueling {
    Fueling {
      id,
      vehicle_id: self.vehicle_id,
      date: self.date,
      odometer_km: self.odometer_km,
      fuel_station: self.fuel_station,
      quantity: self.quantity,
      cost: self.cost,
      course: self.course,
      driving_style: self.driving_style,
    }
  }
}

/// The row shape used for a vehicle's fueling history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelingSummary {
  pub id:       FuelingId,
  pub quantity: f64,
  pub cost:     f64,
}
