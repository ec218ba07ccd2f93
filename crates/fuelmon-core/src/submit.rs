//! Validate-then-persist helpers for front ends.
//!
//! The repositories trust their input. These functions run the business
//! rules from [`crate::validation`] first and only touch the repository when
//! every rule holds.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
  fueling::NewFueling,
  id::{FuelingId, VehicleId},
  store::{FuelingRepository, VehicleRepository},
  validation::{ValidationError, validate_fueling, validate_vehicle},
  vehicle::{NewVehicle, VehicleInsert},
};

#[derive(Debug, Error)]
pub enum SubmitError<E: std::error::Error + 'static> {
  #[error(transparent)]
  Invalid(#[from] ValidationError),

  #[error("store error: {0}")]
  Store(#[source] E),
}

impl<E: std::error::Error + 'static> SubmitError<E> {
  pub fn validation(&self) -> Option<&ValidationError> {
    match self {
      Self::Invalid(v) => Some(v),
      Self::Store(_) => None,
    }
  }
}

pub type SubmitResult<T, E> = Result<T, SubmitError<E>>;

/// Validate and insert a vehicle.
pub fn register_vehicle<R: VehicleRepository>(
  repo: &R,
  input: &NewVehicle,
) -> SubmitResult<VehicleInsert, R::Error> {
  validate_vehicle(input)?;
  repo.create(input).map_err(SubmitError::Store)
}

/// Validate and overwrite a vehicle.
pub fn amend_vehicle<R: VehicleRepository>(
  repo: &R,
  id: VehicleId,
  input: &NewVehicle,
) -> SubmitResult<usize, R::Error> {
  validate_vehicle(input)?;
  repo.update(id, input).map_err(SubmitError::Store)
}

/// Validate a new fueling against the vehicle's current minimum odometer and
/// insert it.
pub fn record_fueling<R: FuelingRepository>(
  repo: &R,
  input: &NewFueling,
  today: NaiveDate,
) -> SubmitResult<FuelingId, R::Error> {
  let minimum = repo
    .minimum_allowed_odometer(input.vehicle_id)
    .map_err(SubmitError::Store)?;
  validate_fueling(input, minimum, today)?;
  repo.create(input).map_err(SubmitError::Store)
}

/// Validate an edited fueling against the readings recorded around it and
/// write it back. The floor comes from fuelings recorded before `id`; the
/// reading must also stay below the next fueling recorded after it.
pub fn amend_fueling<R: FuelingRepository>(
  repo: &R,
  id: FuelingId,
  input: &NewFueling,
  today: NaiveDate,
) -> SubmitResult<usize, R::Error> {
  let minimum = repo
    .minimum_allowed_odometer_before(input.vehicle_id, id)
    .map_err(SubmitError::Store)?;
  validate_fueling(input, minimum, today)?;

  let ceiling = repo
    .next_recorded_odometer_after(input.vehicle_id, id)
    .map_err(SubmitError::Store)?;
  if let Some(ceiling) = ceiling
    && input.odometer_km >= ceiling
  {
    return Err(ValidationError::OdometerAboveLater {
      candidate: input.odometer_km,
      ceiling,
    }
    .into());
  }

  repo.update(id, input).map_err(SubmitError::Store)
}

#[cfg(test)]
mod tests {
  use std::cell::{Cell, RefCell};

  use super::*;
  use crate::{
    fueling::{CourseTypes, DrivingStyle, Fueling, FuelingSummary},
    id::MakeId,
    validation::Rule,
    vehicle::{Vehicle, VehicleSummary},
  };

  #[derive(Debug, Error)]
  #[error("unreachable")]
  struct NoError;

  /// Records what reached the repository; the odometer bounds are fixed.
  #[derive(Default)]
  struct Recorder {
    minimum: u32,
    ceiling: Option<u32>,
    created: RefCell<Vec<NewFueling>>,
    updated: Cell<usize>,
  }

  impl FuelingRepository for Recorder {
    type Error = NoError;

    fn minimum_allowed_odometer(&self, _: VehicleId) -> Result<u32, NoError> {
      Ok(self.minimum)
    }

    fn minimum_allowed_odometer_before(&self, _: VehicleId, _: FuelingId) -> Result<u32, NoError> {
      Ok(self.minimum)
    }

    fn next_recorded_odometer_after(
      &self,
      _: VehicleId,
      _: FuelingId,
    ) -> Result<Option<u32>, NoError> {
      Ok(self.ceiling)
    }

    fn create(&self, input: &NewFueling) -> Result<FuelingId, NoError> {
      self.created.borrow_mut().push(input.clone());
      Ok(FuelingId(self.created.borrow().len() as i64))
    }

    fn update(&self, _: FuelingId, _: &NewFueling) -> Result<usize, NoError> {
      self.updated.set(self.updated.get() + 1);
      Ok(1)
    }

    fn delete(&self, _: FuelingId) -> Result<bool, NoError> { Ok(false) }

    fn get(&self, _: FuelingId) -> Result<Option<Fueling>, NoError> { Ok(None) }

    fn list_by_vehicle(&self, _: VehicleId) -> Result<Vec<FuelingSummary>, NoError> {
      Ok(vec![])
    }

    fn last_fueling_vehicle(&self) -> Result<Option<VehicleId>, NoError> { Ok(None) }
  }

  /// Counts vehicle writes that reached the repository.
  #[derive(Default)]
  struct VehicleRecorder {
    writes: Cell<usize>,
  }

  impl VehicleRepository for VehicleRecorder {
    type Error = NoError;

    fn create(&self, _: &NewVehicle) -> Result<VehicleInsert, NoError> {
      self.writes.set(self.writes.get() + 1);
      Ok(VehicleInsert::Created(VehicleId(1)))
    }

    fn update(&self, _: VehicleId, _: &NewVehicle) -> Result<usize, NoError> {
      self.writes.set(self.writes.get() + 1);
      Ok(1)
    }

    fn delete(&self, _: VehicleId) -> Result<bool, NoError> { Ok(false) }

    fn get(&self, _: VehicleId) -> Result<Option<Vehicle>, NoError> { Ok(None) }

    fn list(&self) -> Result<Vec<VehicleSummary>, NoError> { Ok(vec![]) }

    fn count(&self) -> Result<u64, NoError> { Ok(0) }

    fn registration(&self, _: VehicleId) -> Result<Option<String>, NoError> { Ok(None) }
  }

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() }

  fn input(odometer_km: u32) -> NewFueling {
    NewFueling {
      vehicle_id:    VehicleId(1),
      date:          today(),
      odometer_km,
      fuel_station:  "Galp".into(),
      quantity:      40.0,
      cost:          70.0,
      course:        CourseTypes::new(false, true, false),
      driving_style: DrivingStyle::Normal,
    }
  }

  fn vehicle() -> NewVehicle {
    NewVehicle {
      make_id:       MakeId(1),
      model:         "Clio".into(),
      fuel_type_id:  None,
      fuel_capacity: 45,
      registration:  "12-AB-34".into(),
      year:          2009,
      odometer_km:   0,
    }
  }

  // ── Fuelings ──────────────────────────────────────────────────────────

  #[test]
  fn rejected_fueling_never_reaches_the_repository() {
    let repo = Recorder { minimum: 1050, ..Default::default() };

    let err = record_fueling(&repo, &input(1000), today()).unwrap_err();
    assert_eq!(err.validation().map(ValidationError::rule), Some(Rule::Odometer));
    assert!(repo.created.borrow().is_empty());
  }

  #[test]
  fn accepted_fueling_is_created() {
    let repo = Recorder { minimum: 1050, ..Default::default() };

    let id = record_fueling(&repo, &input(1100), today()).unwrap();
    assert_eq!(id, FuelingId(1));
    assert_eq!(repo.created.borrow().len(), 1);
  }

  #[test]
  fn amend_accepts_reading_between_neighbours() {
    let repo = Recorder { minimum: 1000, ceiling: Some(1300), ..Default::default() };
    assert_eq!(amend_fueling(&repo, FuelingId(1), &input(1100), today()).unwrap(), 1);
    assert_eq!(repo.updated.get(), 1);
  }

  #[test]
  fn amend_rejects_reading_at_or_above_the_next_one() {
    let repo = Recorder { minimum: 1000, ceiling: Some(1300), ..Default::default() };

    let err = amend_fueling(&repo, FuelingId(1), &input(1300), today()).unwrap_err();
    assert!(matches!(
      err.validation(),
      Some(ValidationError::OdometerAboveLater { candidate: 1300, ceiling: 1300 })
    ));
    assert_eq!(err.validation().map(ValidationError::rule), Some(Rule::Odometer));
    assert_eq!(repo.updated.get(), 0);
  }

  #[test]
  fn amend_rejects_reading_at_the_floor() {
    let repo = Recorder { minimum: 1100, ..Default::default() };
    assert!(amend_fueling(&repo, FuelingId(2), &input(1100), today()).is_err());
    assert_eq!(repo.updated.get(), 0);
  }

  // ── Vehicles ──────────────────────────────────────────────────────────

  #[test]
  fn valid_vehicle_is_registered_and_amended() {
    let repo = VehicleRecorder::default();
    assert_eq!(
      register_vehicle(&repo, &vehicle()).unwrap(),
      VehicleInsert::Created(VehicleId(1))
    );
    assert_eq!(amend_vehicle(&repo, VehicleId(1), &vehicle()).unwrap(), 1);
    assert_eq!(repo.writes.get(), 2);
  }

  #[test]
  fn invalid_vehicle_never_reaches_the_repository() {
    let repo = VehicleRecorder::default();

    let mut no_model = vehicle();
    no_model.model = "  ".into();
    let err = register_vehicle(&repo, &no_model).unwrap_err();
    assert_eq!(err.validation().map(ValidationError::rule), Some(Rule::RequiredFields));

    let mut no_year = vehicle();
    no_year.year = 0;
    let err = amend_vehicle(&repo, VehicleId(1), &no_year).unwrap_err();
    assert_eq!(
      err.validation().map(ValidationError::rule),
      Some(Rule::NonPositiveVehicleSpec)
    );

    assert_eq!(repo.writes.get(), 0);
  }
}
