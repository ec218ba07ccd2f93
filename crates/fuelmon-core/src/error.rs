//! Error types for `fuelmon-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown driving style code: {0}")]
  UnknownDrivingStyle(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
