//! Vehicles registered by the owner.

use serde::{Deserialize, Serialize};

use crate::id::{FuelTypeId, MakeId, VehicleId};

/// A persisted vehicle row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
  pub id:            VehicleId,
  pub make_id:       MakeId,
  pub model:         String,
  pub fuel_type_id:  Option<FuelTypeId>,
  /// Tank capacity in litres.
  pub fuel_capacity: u32,
  pub registration:  String,
  pub year:          u16,
  /// Last known odometer reading; the floor for new fueling entries.
  pub odometer_km:   u32,
}

/// Input for creating or editing a vehicle. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
  pub make_id:       MakeId,
  pub model:         String,
  pub fuel_type_id:  Option<FuelTypeId>,
  pub fuel_capacity: u32,
  pub registration:  String,
  pub year:          u16,
  pub odometer_km:   u32,
}

impl NewVehicle {
  /// Attach a store-assigned id.
  pub fn into_vehicle(self, id: VehicleId) -> Vehicle {
    Vehicle {
      id,
      make_id: self.make_id,
      model: self.model,
      fuel_type_id: self.fuel_type_id,
      fuel_capacity: self.fuel_capacity,
      registration: self.registration,
      year: self.year,
      odometer_km: self.odometer_km,
    }
  }
}

/// The row shape used for vehicle lists: joined with `Make` for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSummary {
  pub id:           VehicleId,
  pub model:        String,
  pub make_name:    String,
  pub registration: String,
}

/// Outcome of inserting a vehicle.
///
/// The registration column ignores conflicting inserts instead of failing,
/// so a duplicate is reported here rather than as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "id", rename_all = "snake_case")]
pub enum VehicleInsert {
  Created(VehicleId),
  DuplicateRegistration,
}

impl VehicleInsert {
  pub fn id(self) -> Option<VehicleId> {
    match self {
      Self::Created(id) => Some(id),
      Self::DuplicateRegistration => None,
    }
  }
}
