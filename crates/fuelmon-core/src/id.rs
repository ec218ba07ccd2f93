//! Surrogate keys assigned by the store.
//!
//! Each entity gets its own newtype so a vehicle id can never be passed where
//! a fueling id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! surrogate_key {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl $name {
      pub fn get(self) -> i64 { self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
      }
    }
  };
}

surrogate_key!(
  /// Row id of a `FuelType` reference entry.
  FuelTypeId
);
surrogate_key!(
  /// Row id of a `Make` reference entry.
  MakeId
);
surrogate_key!(
  /// Row id of a registered vehicle.
  VehicleId
);
surrogate_key!(
  /// Row id of a single fueling event.
  FuelingId
);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_serialize_as_bare_integers() {
    let json = serde_json::to_string(&VehicleId(7)).unwrap();
    assert_eq!(json, "7");

    let back: FuelingId = serde_json::from_str("42").unwrap();
    assert_eq!(back, FuelingId(42));
  }

  #[test]
  fn display_is_the_raw_number() {
    assert_eq!(MakeId(3).to_string(), "3");
  }
}
