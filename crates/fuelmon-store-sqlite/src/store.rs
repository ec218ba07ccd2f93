//! [`SqliteStore`] — the storage handle every repository borrows from.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use fuelmon_core::reference::SeedData;

use crate::{
  Error, FuelingRepo, ReferenceRepo, Result, VehicleRepo,
  schema::{self, SCHEMA_VERSION},
};

/// The fuel monitor database, backed by a single SQLite file.
///
/// Opened once per process and exclusively owned; not meant to be shared
/// between threads. The connection is released by [`close`](Self::close) or
/// when the store is dropped.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) the store at `path`.
  ///
  /// A fresh file gets the schema and the `seed` reference data. A file with
  /// a different schema version is wiped and recreated.
  pub fn open(path: impl AsRef<Path>, seed: &SeedData) -> Result<Self> {
    let path = path.as_ref();
    let unavailable = |source| Error::StorageUnavailable { path: path.to_path_buf(), source };

    let conn = Connection::open(path).map_err(unavailable)?;
    // SQLite opens lazily; touch the file now so an unusable path fails here.
    let version = prepare(&conn).map_err(unavailable)?;
    debug!(?path, version, "opened store");

    Self::init(conn, version, seed)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory(seed: &SeedData) -> Result<Self> {
    let unavailable =
      |source| Error::StorageUnavailable { path: ":memory:".into(), source };
    let conn = Connection::open_in_memory().map_err(unavailable)?;
    let version = prepare(&conn).map_err(unavailable)?;
    Self::init(conn, version, seed)
  }

  fn init(mut conn: Connection, version: i64, seed: &SeedData) -> Result<Self> {
    if version != SCHEMA_VERSION {
      let tx = conn.transaction()?;
      if version == 0 {
        schema::create(&tx, seed)?;
      } else {
        schema::upgrade(&tx, version, SCHEMA_VERSION, seed)?;
      }
      tx.commit()?;
    }
    Ok(Self { conn })
  }

  /// The schema version recorded in the file.
  pub fn schema_version(&self) -> Result<i64> {
    Ok(self.conn.pragma_query_value(None, "user_version", |r| r.get(0))?)
  }

  pub fn reference(&self) -> ReferenceRepo<'_> { ReferenceRepo::new(&self.conn) }

  pub fn vehicles(&self) -> VehicleRepo<'_> { VehicleRepo::new(&self.conn) }

  pub fn fuelings(&self) -> FuelingRepo<'_> { FuelingRepo::new(&self.conn) }

  /// Release the connection. Consuming `self` means a closed store cannot
  /// be used or closed again.
  pub fn close(self) -> Result<()> {
    self.conn.close().map_err(|(_, e)| Error::from(e))?;
    debug!("closed store");
    Ok(())
  }
}

/// Enable foreign keys and read the stored schema version.
///
/// `foreign_keys` is a no-op inside a transaction, so it is set before any
/// schema work starts.
fn prepare(conn: &Connection) -> rusqlite::Result<i64> {
  conn.pragma_update(None, "foreign_keys", true)?;
  conn.pragma_query_value(None, "user_version", |r| r.get(0))
}
