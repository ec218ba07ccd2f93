//! Core types and trait definitions for the fuel monitor.
//!
//! This crate is deliberately free of database dependencies. The storage
//! backend (`fuelmon-store-sqlite`) and the front end (`fuelmon-cli`) both
//! depend on it.

pub mod error;
pub mod fueling;
pub mod id;
pub mod reference;
pub mod store;
pub mod submit;
pub mod validation;
pub mod vehicle;

pub use error::{Error, Result};
