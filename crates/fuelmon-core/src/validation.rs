//! Business rules checked before any fueling or vehicle is persisted.
//!
//! The storage engine only enforces referential integrity. Odometer
//! monotonicity, date and completeness rules live here and must be run by
//! whichever component performs the mutation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{fueling::NewFueling, vehicle::NewVehicle};

// ─── Predicates ──────────────────────────────────────────────────────────────

/// A fueling may not be dated in the future.
pub fn is_date_valid(candidate: NaiveDate, today: NaiveDate) -> bool {
  candidate <= today
}

/// A new reading must be strictly greater than the allowed minimum.
pub fn is_odometer_valid(candidate: u32, minimum: u32) -> bool {
  candidate > minimum
}

/// Every required text field has something other than whitespace in it.
pub fn is_form_complete(fields: &[&str]) -> bool {
  fields.iter().all(|f| !f.trim().is_empty())
}

/// Finite and strictly positive; NaN and infinities are rejected.
pub fn is_positive_amount(value: f64) -> bool { value.is_finite() && value > 0.0 }

pub fn has_course_type(city: bool, road: bool, freeway: bool) -> bool {
  city || road || freeway
}

// ─── Failure reporting ───────────────────────────────────────────────────────

/// Which rule rejected an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
  Date,
  Odometer,
  RequiredFields,
  CourseType,
  /// Quantity or cost was zero, negative, infinite or not a number.
  NonPositiveAmount,
  /// Vehicle capacity or year was zero.
  NonPositiveVehicleSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("date {date} is after today ({today})")]
  FutureDate { date: NaiveDate, today: NaiveDate },

  #[error("odometer reading {candidate} km must be greater than {minimum} km")]
  OdometerTooLow { candidate: u32, minimum: u32 },

  #[error("all required fields must be filled in")]
  RequiredFields,

  #[error("select at least one course type (city, road or freeway)")]
  NoCourseType,

  #[error("odometer reading {candidate} km must be less than the later reading of {ceiling} km")]
  OdometerAboveLater { candidate: u32, ceiling: u32 },

  #[error("quantity and cost must be finite and greater than zero")]
  NonPositiveAmount,

  #[error("fuel capacity and year must be greater than zero")]
  NonPositiveVehicleSpec,
}

impl ValidationError {
  pub fn rule(&self) -> Rule {
    match self {
      Self::FutureDate { .. } => Rule::Date,
      Self::OdometerTooLow { .. } | Self::OdometerAboveLater { .. } => Rule::Odometer,
      Self::RequiredFields => Rule::RequiredFields,
      Self::NoCourseType => Rule::CourseType,
      Self::NonPositiveAmount => Rule::NonPositiveAmount,
      Self::NonPositiveVehicleSpec => Rule::NonPositiveVehicleSpec,
    }
  }
}

// ─── Composite checks ────────────────────────────────────────────────────────

/// Run every fueling rule, returning the first one that fails.
///
/// `minimum` is the vehicle's minimum allowed odometer as reported by the
/// fueling repository.
pub fn validate_fueling(
  input: &NewFueling,
  minimum: u32,
  today: NaiveDate,
) -> Result<(), ValidationError> {
  if !is_form_complete(&[&input.fuel_station]) {
    return Err(ValidationError::RequiredFields);
  }
  let c = input.course;
  if !has_course_type(c.city, c.road, c.freeway) {
    return Err(ValidationError::NoCourseType);
  }
  if !is_positive_amount(input.quantity) || !is_positive_amount(input.cost) {
    return Err(ValidationError::NonPositiveAmount);
  }
  if !is_odometer_valid(input.odometer_km, minimum) {
    return Err(ValidationError::OdometerTooLow {
      candidate: input.odometer_km,
      minimum,
    });
  }
  if !is_date_valid(input.date, today) {
    return Err(ValidationError::FutureDate { date: input.date, today });
  }
  Ok(())
}

pub fn validate_vehicle(input: &NewVehicle) -> Result<(), ValidationError> {
  if !is_form_complete(&[&input.registration, &input.model]) {
    return Err(ValidationError::RequiredFields);
  }
  if input.fuel_capacity == 0 || input.year == 0 {
    return Err(ValidationError::NonPositiveVehicleSpec);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    fueling::{CourseTypes, DrivingStyle},
    id::{MakeId, VehicleId},
  };

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn fueling() -> NewFueling {
    NewFueling {
      vehicle_id:    VehicleId(1),
      date:          date(2024, 3, 10),
      odometer_km:   1050,
      fuel_station:  "Shell".into(),
      quantity:      35.0,
      cost:          55.0,
      course:        CourseTypes::new(true, false, false),
      driving_style: DrivingStyle::Calm,
    }
  }

  // ── Predicates ────────────────────────────────────────────────────────

  #[test]
  fn date_rule_accepts_today_and_past() {
    let today = date(2024, 3, 10);
    assert!(is_date_valid(today, today));
    assert!(is_date_valid(date(2024, 3, 9), today));
    assert!(is_date_valid(date(1970, 1, 1), today));
  }

  #[test]
  fn date_rule_rejects_future() {
    let today = date(2024, 3, 10);
    assert!(!is_date_valid(date(2024, 3, 11), today));
    assert!(!is_date_valid(date(2025, 1, 1), today));
  }

  #[test]
  fn date_rule_at_epoch_boundary() {
    let epoch = date(1970, 1, 1);
    assert!(is_date_valid(epoch, epoch));
    assert!(is_date_valid(date(1969, 12, 31), epoch));
    assert!(!is_date_valid(date(1970, 1, 2), epoch));
  }

  #[test]
  fn odometer_rule_is_strict() {
    assert!(is_odometer_valid(1051, 1050));
    assert!(!is_odometer_valid(1050, 1050));
    assert!(!is_odometer_valid(1000, 1050));
    assert!(is_odometer_valid(1, 0));
    assert!(!is_odometer_valid(0, 0));
  }

  #[test]
  fn form_completeness() {
    assert!(is_form_complete(&["Shell", "x"]));
    assert!(is_form_complete(&[]));
    assert!(!is_form_complete(&["Shell", ""]));
    assert!(!is_form_complete(&["   "]));
  }

  #[test]
  fn amounts_must_be_finite_and_positive() {
    assert!(is_positive_amount(0.01));
    assert!(!is_positive_amount(0.0));
    assert!(!is_positive_amount(-1.0));
    assert!(!is_positive_amount(f64::NAN));
    assert!(!is_positive_amount(f64::INFINITY));
    assert!(!is_positive_amount(f64::NEG_INFINITY));
  }

  #[test]
  fn course_type_requires_one_flag() {
    assert!(!has_course_type(false, false, false));
    assert!(has_course_type(true, false, false));
    assert!(has_course_type(false, true, false));
    assert!(has_course_type(false, false, true));
    assert!(has_course_type(true, true, true));
  }

  // ── Composite ─────────────────────────────────────────────────────────

  #[test]
  fn valid_fueling_passes() {
    assert_eq!(validate_fueling(&fueling(), 1000, date(2024, 3, 10)), Ok(()));
  }

  #[test]
  fn fueling_failures_carry_their_rule() {
    let today = date(2024, 3, 10);

    let mut f = fueling();
    f.fuel_station = String::new();
    assert_eq!(validate_fueling(&f, 0, today).unwrap_err().rule(), Rule::RequiredFields);

    let mut f = fueling();
    f.course = CourseTypes::default();
    assert_eq!(validate_fueling(&f, 0, today).unwrap_err().rule(), Rule::CourseType);

    let mut f = fueling();
    f.cost = 0.0;
    assert_eq!(validate_fueling(&f, 0, today).unwrap_err().rule(), Rule::NonPositiveAmount);

    let mut f = fueling();
    f.quantity = f64::NAN;
    assert_eq!(validate_fueling(&f, 0, today).unwrap_err().rule(), Rule::NonPositiveAmount);

    let mut f = fueling();
    f.quantity = f64::INFINITY;
    f.cost = f64::INFINITY;
    assert_eq!(validate_fueling(&f, 0, today).unwrap_err().rule(), Rule::NonPositiveAmount);

    let mut f = fueling();
    f.cost = -3.0;
    assert_eq!(validate_fueling(&f, 0, today).unwrap_err().rule(), Rule::NonPositiveAmount);

    let f = fueling();
    assert_eq!(
      validate_fueling(&f, 1050, today),
      Err(ValidationError::OdometerTooLow { candidate: 1050, minimum: 1050 })
    );

    let f = fueling();
    assert_eq!(
      validate_fueling(&f, 0, date(2024, 3, 9)).unwrap_err().rule(),
      Rule::Date
    );
  }

  #[test]
  fn completeness_is_checked_before_odometer() {
    let mut f = fueling();
    f.fuel_station = " ".into();
    f.odometer_km = 0;
    assert_eq!(
      validate_fueling(&f, 1050, date(2024, 3, 10)),
      Err(ValidationError::RequiredFields)
    );
  }

  #[test]
  fn vehicle_rules() {
    let v = NewVehicle {
      make_id:       MakeId(1),
      model:         "Corolla".into(),
      fuel_type_id:  None,
      fuel_capacity: 50,
      registration:  "AA-11-AA".into(),
      year:          2015,
      odometer_km:   0,
    };
    assert_eq!(validate_vehicle(&v), Ok(()));

    let mut blank = v.clone();
    blank.registration = String::new();
    assert_eq!(validate_vehicle(&blank), Err(ValidationError::RequiredFields));

    let mut empty_tank = v;
    empty_tank.fuel_capacity = 0;
    assert_eq!(
      validate_vehicle(&empty_tank),
      Err(ValidationError::NonPositiveVehicleSpec)
    );
  }
}
