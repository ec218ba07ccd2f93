//! Error type for `fuelmon-store-sqlite`.

use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database file could not be opened or created. Not recoverable.
  #[error("storage unavailable at {path:?}: {source}")]
  StorageUnavailable {
    path:   PathBuf,
    source: rusqlite::Error,
  },

  /// A foreign-key, NOT NULL or uniqueness constraint rejected the write.
  #[error("constraint violation: {0}")]
  ConstraintViolation(String),

  /// A reference table is empty, meaning the seed step never ran.
  #[error("reference table {0} is empty")]
  MissingReferenceData(&'static str),

  #[error("core error: {0}")]
  Core(#[from] fuelmon_core::Error),

  #[error("database error: {0}")]
  Database(rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),
}

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self {
    match e {
      rusqlite::Error::SqliteFailure(failure, message)
        if failure.code == ErrorCode::ConstraintViolation =>
      {
        Self::ConstraintViolation(message.unwrap_or_else(|| failure.to_string()))
      }
      other => Self::Database(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
