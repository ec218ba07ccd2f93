//! Repository traits and the row shapes they exchange.
//!
//! The traits are implemented by storage backends (e.g.
//! `fuelmon-store-sqlite`). Front ends depend on these abstractions rather
//! than on a concrete backend.
//!
//! Every call is a blocking round-trip and its own atomic unit; no
//! transaction spans multiple calls. "Not found" is never an error: lookups
//! return `None`, lists come back empty and mutations report zero rows.

use crate::{
  fueling::{Fueling, FuelingSummary, NewFueling},
  id::{FuelingId, VehicleId},
  reference::{FuelType, Make},
  vehicle::{NewVehicle, Vehicle, VehicleInsert, VehicleSummary},
};

// ─── Reference data ──────────────────────────────────────────────────────────

/// Read-only access to the seeded lookup tables, in insertion order.
pub trait ReferenceRepository {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All fuel types. An empty table means seeding never ran, which backends
  /// report as an error.
  fn list_fuel_types(&self) -> Result<Vec<FuelType>, Self::Error>;

  /// All makes. Same contract as [`list_fuel_types`](Self::list_fuel_types).
  fn list_makes(&self) -> Result<Vec<Make>, Self::Error>;
}

// ─── Vehicles ────────────────────────────────────────────────────────────────

pub trait VehicleRepository {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a vehicle. A registration that already exists is ignored by the
  /// store and reported as [`VehicleInsert::DuplicateRegistration`].
  fn create(&self, input: &NewVehicle) -> Result<VehicleInsert, Self::Error>;

  /// Overwrite every field of vehicle `id`. Returns the number of rows
  /// changed; `0` when no vehicle has that id.
  fn update(&self, id: VehicleId, input: &NewVehicle) -> Result<usize, Self::Error>;

  /// Delete a vehicle together with all of its fuelings.
  fn delete(&self, id: VehicleId) -> Result<bool, Self::Error>;

  fn get(&self, id: VehicleId) -> Result<Option<Vehicle>, Self::Error>;

  /// All vehicles joined with their make name.
  fn list(&self) -> Result<Vec<VehicleSummary>, Self::Error>;

  fn count(&self) -> Result<u64, Self::Error>;

  fn registration(&self, id: VehicleId) -> Result<Option<String>, Self::Error>;
}

// ─── Fuelings ────────────────────────────────────────────────────────────────

pub trait FuelingRepository {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The larger of the vehicle's baseline odometer and its highest recorded
  /// fueling reading. New entries must exceed this value. `0` for an
  /// unknown vehicle.
  fn minimum_allowed_odometer(&self, vehicle_id: VehicleId) -> Result<u32, Self::Error>;

  /// Floor for editing the fueling `before`: the vehicle's baseline raised
  /// by the highest reading among fuelings recorded before it.
  fn minimum_allowed_odometer_before(
    &self,
    vehicle_id: VehicleId,
    before: FuelingId,
  ) -> Result<u32, Self::Error>;

  /// Lowest reading among the vehicle's fuelings recorded after `after`.
  /// An edited reading must stay below it.
  fn next_recorded_odometer_after(
    &self,
    vehicle_id: VehicleId,
    after: FuelingId,
  ) -> Result<Option<u32>, Self::Error>;

  /// Insert a fueling. Assumes the input already passed validation; only
  /// the existence of the vehicle is checked by the store.
  fn create(&self, input: &NewFueling) -> Result<FuelingId, Self::Error>;

  fn update(&self, id: FuelingId, input: &NewFueling) -> Result<usize, Self::Error>;

  fn delete(&self, id: FuelingId) -> Result<bool, Self::Error>;

  fn get(&self, id: FuelingId) -> Result<Option<Fueling>, Self::Error>;

  fn list_by_vehicle(&self, vehicle_id: VehicleId) -> Result<Vec<FuelingSummary>, Self::Error>;

  /// Vehicle of the most recently inserted fueling, if any.
  fn last_fueling_vehicle(&self) -> Result<Option<VehicleId>, Self::Error>;
}
