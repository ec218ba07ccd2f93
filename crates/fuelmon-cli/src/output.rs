//! Rendering of rows as text tables or JSON.

use anyhow::Result;
use fuelmon_core::{
  fueling::FuelingSummary,
  reference::{FuelType, Make},
  vehicle::VehicleSummary,
};
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

pub struct Output {
  json: bool,
}

impl Output {
  pub fn new(json: bool) -> Self { Self { json } }

  /// Print `value` as pretty JSON, or as whatever `render` produces.
  pub fn emit<T: Serialize + ?Sized>(
    &self,
    value: &T,
    render: impl FnOnce(&T) -> String,
  ) -> Result<()> {
    if self.json {
      println!("{}", serde_json::to_string_pretty(value)?);
    } else {
      let text = render(value);
      if !text.is_empty() {
        println!("{}", text.trim_end());
      }
    }
    Ok(())
  }
}

/// Render rows as a rounded table with a header line.
pub fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
  Table::new(rows).with(Style::rounded()).to_string()
}

// ─── Rows ────────────────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct VehicleRow {
  #[tabled(rename = "ID")]
  pub id:           i64,
  #[tabled(rename = "Make")]
  pub make:         String,
  #[tabled(rename = "Model")]
  pub model:        String,
  #[tabled(rename = "Registration")]
  pub registration: String,
}

impl From<&VehicleSummary> for VehicleRow {
  fn from(v: &VehicleSummary) -> Self {
    Self {
      id:           v.id.get(),
      make:         v.make_name.clone(),
      model:        v.model.clone(),
      registration: v.registration.clone(),
    }
  }
}

#[derive(Tabled)]
pub struct FuelingRow {
  #[tabled(rename = "ID")]
  pub id:       i64,
  #[tabled(rename = "Quantity (L)")]
  pub quantity: String,
  #[tabled(rename = "Cost")]
  pub cost:     String,
}

impl From<&FuelingSummary> for FuelingRow {
  fn from(f: &FuelingSummary) -> Self {
    Self {
      id:       f.id.get(),
      quantity: format!("{:.2}", f.quantity),
      cost:     format!("{:.2}", f.cost),
    }
  }
}

/// One row of a reference list (fuel types or makes).
#[derive(Tabled)]
pub struct NamedRow {
  #[tabled(rename = "ID")]
  pub id:   i64,
  #[tabled(rename = "Name")]
  pub name: String,
}

impl From<&FuelType> for NamedRow {
  fn from(r: &FuelType) -> Self { Self { id: r.id.get(), name: r.name.clone() } }
}

impl From<&Make> for NamedRow {
  fn from(r: &Make) -> Self { Self { id: r.id.get(), name: r.name.clone() } }
}
