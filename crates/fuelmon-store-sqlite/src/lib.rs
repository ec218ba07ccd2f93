//! SQLite backend for the fuel monitor.
//!
//! A single [`SqliteStore`] owns the connection for the life of the process;
//! the repositories it hands out borrow that connection. All calls are
//! synchronous.

mod encode;
mod fuelings;
mod reference;
mod schema;
mod store;
mod vehicles;

pub mod error;

pub use error::{Error, Result};
pub use fuelings::FuelingRepo;
pub use reference::ReferenceRepo;
pub use schema::SCHEMA_VERSION;
pub use store::SqliteStore;
pub use vehicles::VehicleRepo;
