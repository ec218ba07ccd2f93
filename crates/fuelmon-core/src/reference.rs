//! Reference data: fuel types and vehicle makes.
//!
//! Both tables are seeded once when the store is created and are never
//! edited by the application afterwards.

use serde::{Deserialize, Serialize};

use crate::id::{FuelTypeId, MakeId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelType {
  pub id:   FuelTypeId,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Make {
  pub id:   MakeId,
  pub name: String,
}

/// Names inserted into the reference tables on first creation (and again
/// after a destructive upgrade). Supplied by the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
  pub fuel_types: Vec<String>,
  pub makes:      Vec<String>,
}

impl SeedData {
  pub fn new(
    fuel_types: impl IntoIterator<Item = impl Into<String>>,
    makes: impl IntoIterator<Item = impl Into<String>>,
  ) -> Self {
    Self {
      fuel_types: fuel_types.into_iter().map(Into::into).collect(),
      makes:      makes.into_iter().map(Into::into).collect(),
    }
  }
}

impl Default for SeedData {
  fn default() -> Self {
    Self::new(
      ["Gasoline", "Diesel", "LPG", "Electric", "Hybrid"],
      [
        "Audi",
        "BMW",
        "Citroën",
        "Fiat",
        "Ford",
        "Honda",
        "Hyundai",
        "Mercedes-Benz",
        "Nissan",
        "Opel",
        "Peugeot",
        "Renault",
        "Seat",
        "Škoda",
        "Toyota",
        "Volkswagen",
        "Volvo",
      ],
    )
  }
}
