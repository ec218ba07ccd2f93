//! Subcommand definitions and their handlers.
//!
//! Handlers parse nothing themselves: clap hands them typed values, they run
//! the business rules through `fuelmon_core::submit` and render the rows the
//! repositories return.

use anyhow::{Context as _, Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use fuelmon_core::{
  fueling::{CourseTypes, DrivingStyle, NewFueling},
  id::{FuelTypeId, FuelingId, MakeId, VehicleId},
  reference::{FuelType, Make},
  store::{FuelingRepository, ReferenceRepository, VehicleRepository},
  submit::{amend_fueling, amend_vehicle, record_fueling, register_vehicle},
  vehicle::{NewVehicle, VehicleInsert},
};
use fuelmon_store_sqlite::SqliteStore;
use serde_json::json;
use tracing::info;

use crate::output::{FuelingRow, NamedRow, Output, VehicleRow, table};

// ─── Command tree ─────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// List the fuel types vehicles can be registered with.
  FuelTypes,
  /// List the vehicle makes.
  Makes,
  /// Manage registered vehicles.
  #[command(subcommand)]
  Vehicle(VehicleCommand),
  /// Record and review fuelings.
  #[command(subcommand)]
  Fueling(FuelingCommand),
}

#[derive(Subcommand, Debug)]
pub enum VehicleCommand {
  /// Register a new vehicle.
  Add(VehicleArgs),
  /// List all vehicles.
  List,
  /// Show one vehicle.
  Show { id: i64 },
  /// Replace every field of a vehicle.
  Edit {
    id:   i64,
    #[command(flatten)]
    args: VehicleArgs,
  },
  /// Delete a vehicle and all of its fuelings.
  Delete {
    id:  i64,
    /// Confirm that the vehicle's fuelings will be deleted too.
    #[arg(long)]
    yes: bool,
  },
  /// Print the number of registered vehicles.
  Count,
}

#[derive(Args, Debug)]
pub struct VehicleArgs {
  /// Make id (see `fuelmon makes`).
  #[arg(long)]
  make:         i64,
  #[arg(long)]
  model:        String,
  /// Fuel type id (see `fuelmon fuel-types`).
  #[arg(long)]
  fuel_type:    Option<i64>,
  /// Tank capacity in litres.
  #[arg(long)]
  capacity:     u32,
  #[arg(long)]
  registration: String,
  #[arg(long)]
  year:         u16,
  /// Current odometer reading in km.
  #[arg(long, default_value_t = 0)]
  odometer:     u32,
}

impl From<VehicleArgs> for NewVehicle {
  fn from(a: VehicleArgs) -> Self {
    Self {
      make_id:       MakeId(a.make),
      model:         a.model,
      fuel_type_id:  a.fuel_type.map(FuelTypeId),
      fuel_capacity: a.capacity,
      registration:  a.registration,
      year:          a.year,
      odometer_km:   a.odometer,
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum FuelingCommand {
  /// Record a fueling.
  Add(FuelingArgs),
  /// List a vehicle's fuelings.
  List { vehicle: i64 },
  /// Show one fueling.
  Show { id: i64 },
  /// Replace every field of a fueling.
  Edit {
    id:   i64,
    #[command(flatten)]
    args: FuelingArgs,
  },
  /// Delete one fueling.
  Delete { id: i64 },
  /// Print the reading a new fueling for this vehicle must exceed.
  MinOdometer { vehicle: i64 },
}

#[derive(Args, Debug)]
pub struct FuelingArgs {
  /// Vehicle id. Defaults to the vehicle of the latest fueling.
  #[arg(long)]
  vehicle:  Option<i64>,
  /// Date as YYYY-MM-DD. Defaults to today.
  #[arg(long)]
  date:     Option<NaiveDate>,
  /// Odometer reading in km.
  #[arg(long)]
  odometer: u32,
  #[arg(long)]
  station:  String,
  /// Litres.
  #[arg(long)]
  quantity: f64,
  #[arg(long)]
  cost:     f64,
  #[arg(long)]
  city:     bool,
  #[arg(long)]
  road:     bool,
  #[arg(long)]
  freeway:  bool,
  /// calm, normal or aggressive.
  #[arg(long, default_value_t = DrivingStyle::Normal)]
  style:    DrivingStyle,
}

impl FuelingArgs {
  fn into_new_fueling(self, vehicle_id: VehicleId, date: NaiveDate) -> NewFueling {
    NewFueling {
      vehicle_id,
      date,
      odometer_km: self.odometer,
      fuel_station: self.station,
      quantity: self.quantity,
      cost: self.cost,
      course: CourseTypes::new(self.city, self.road, self.freeway),
      driving_style: self.style,
    }
  }
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

pub fn run(store: &SqliteStore, command: Command, out: &Output) -> Result<()> {
  match command {
    Command::FuelTypes => {
      let rows = store.reference().list_fuel_types()?;
      out.emit(&rows, |rows| render_fuel_types(rows))
    }
    Command::Makes => {
      let rows = store.reference().list_makes()?;
      out.emit(&rows, |rows| render_makes(rows))
    }
    Command::Vehicle(cmd) => run_vehicle(store, cmd, out),
    Command::Fueling(cmd) => run_fueling(store, cmd, out),
  }
}

fn today() -> NaiveDate { Local::now().date_naive() }

// ─── Vehicles ─────────────────────────────────────────────────────────────────

fn run_vehicle(store: &SqliteStore, cmd: VehicleCommand, out: &Output) -> Result<()> {
  let vehicles = store.vehicles();

  match cmd {
    VehicleCommand::Add(args) => {
      let input = NewVehicle::from(args);
      match register_vehicle(&vehicles, &input)? {
        VehicleInsert::Created(id) => {
          info!(%id, registration = %input.registration, "vehicle registered");
          out.emit(&json!({ "id": id }), |_| format!("registered vehicle {id}"))
        }
        VehicleInsert::DuplicateRegistration => {
          bail!("a vehicle with registration {:?} already exists", input.registration)
        }
      }
    }

    VehicleCommand::List => {
      let rows = vehicles.list()?;
      out.emit(&rows, |rows| table(rows.iter().map(VehicleRow::from)))
    }

    VehicleCommand::Show { id } => {
      let id = VehicleId(id);
      let vehicle = vehicles
        .get(id)?
        .ok_or_else(|| anyhow!("vehicle {id} not found"))?;
      let makes = store.reference().list_makes()?;
      let fuel_types = store.reference().list_fuel_types()?;

      out.emit(&vehicle, |v| {
        let make = makes
          .iter()
          .find(|m| m.id == v.make_id)
          .map_or("?", |m| m.name.as_str());
        let fuel = v
          .fuel_type_id
          .and_then(|f| fuel_types.iter().find(|t| t.id == f))
          .map_or("-", |t| t.name.as_str());
        format!(
          "vehicle {}\n  registration  {}\n  make          {make}\n  model         {}\n  \
           fuel type     {fuel}\n  capacity      {} l\n  year          {}\n  odometer      {} km",
          v.id, v.registration, v.model, v.fuel_capacity, v.year, v.odometer_km,
        )
      })
    }

    VehicleCommand::Edit { id, args } => {
      let id = VehicleId(id);
      let changed = amend_vehicle(&vehicles, id, &NewVehicle::from(args))?;
      if changed == 0 {
        bail!("vehicle {id} was not updated (unknown id or registration already taken)");
      }
      out.emit(&json!({ "updated": changed }), |_| format!("updated vehicle {id}"))
    }

    VehicleCommand::Delete { id, yes } => {
      let id = VehicleId(id);
      if !yes {
        let fuelings = store.fuelings().list_by_vehicle(id)?.len();
        bail!(
          "deleting vehicle {id} also deletes its {fuelings} fueling(s); re-run with --yes"
        );
      }
      if !vehicles.delete(id)? {
        bail!("vehicle {id} not found");
      }
      info!(%id, "vehicle deleted");
      out.emit(&json!({ "deleted": true }), |_| format!("deleted vehicle {id}"))
    }

    VehicleCommand::Count => {
      let n = vehicles.count()?;
      out.emit(&n, |n| n.to_string())
    }
  }
}

// ─── Fuelings ─────────────────────────────────────────────────────────────────

fn run_fueling(store: &SqliteStore, cmd: FuelingCommand, out: &Output) -> Result<()> {
  let fuelings = store.fuelings();

  match cmd {
    FuelingCommand::Add(args) => {
      let vehicle_id = match args.vehicle {
        Some(id) => VehicleId(id),
        None => fuelings
          .last_fueling_vehicle()?
          .context("no --vehicle given and no previous fueling to default from")?,
      };
      let date = args.date.unwrap_or_else(today);
      let input = args.into_new_fueling(vehicle_id, date);

      let id = record_fueling(&fuelings, &input, today())?;
      info!(%id, %vehicle_id, "fueling recorded");
      out.emit(&json!({ "id": id }), |_| {
        format!("recorded fueling {id} for vehicle {vehicle_id}")
      })
    }

    FuelingCommand::List { vehicle } => {
      let rows = fuelings.list_by_vehicle(VehicleId(vehicle))?;
      out.emit(&rows, |rows| table(rows.iter().map(FuelingRow::from)))
    }

    FuelingCommand::Show { id } => {
      let id = FuelingId(id);
      let fueling = fuelings
        .get(id)?
        .ok_or_else(|| anyhow!("fueling {id} not found"))?;
      out.emit(&fueling, |f| {
        let course: Vec<&str> = [
          (f.course.city, "city"),
          (f.course.road, "road"),
          (f.course.freeway, "freeway"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();
        format!(
          "fueling {}\n  vehicle   {}\n  date      {}\n  odometer  {} km\n  station   {}\n  \
           quantity  {:.2} l\n  cost      {:.2}\n  course    {}\n  style     {}",
          f.id,
          f.vehicle_id,
          f.date,
          f.odometer_km,
          f.fuel_station,
          f.quantity,
          f.cost,
          course.join(", "),
          f.driving_style,
        )
      })
    }

    FuelingCommand::Edit { id, args } => {
      let id = FuelingId(id);
      let existing = fuelings
        .get(id)?
        .ok_or_else(|| anyhow!("fueling {id} not found"))?;
      let vehicle_id = args.vehicle.map_or(existing.vehicle_id, VehicleId);
      let date = args.date.unwrap_or(existing.date);
      let input = args.into_new_fueling(vehicle_id, date);

      let changed = amend_fueling(&fuelings, id, &input, today())?;
      out.emit(&json!({ "updated": changed }), |_| format!("updated fueling {id}"))
    }

    FuelingCommand::Delete { id } => {
      let id = FuelingId(id);
      if !fuelings.delete(id)? {
        bail!("fueling {id} not found");
      }
      out.emit(&json!({ "deleted": true }), |_| format!("deleted fueling {id}"))
    }

    FuelingCommand::MinOdometer { vehicle } => {
      let minimum = fuelings.minimum_allowed_odometer(VehicleId(vehicle))?;
      out.emit(&minimum, |m| m.to_string())
    }
  }
}

// ─── Reference rendering ──────────────────────────────────────────────────────

fn render_fuel_types(rows: &[FuelType]) -> String { table(rows.iter().map(NamedRow::from)) }

fn render_makes(rows: &[Make]) -> String { table(rows.iter().map(NamedRow::from)) }

#[cfg(test)]
mod tests {
  use clap::Parser;

  use super::*;

  #[derive(Parser, Debug)]
  struct Harness {
    #[command(subcommand)]
    command: Command,
  }

  fn parse(args: &[&str]) -> Command {
    Harness::try_parse_from(std::iter::once("fuelmon").chain(args.iter().copied()))
      .unwrap()
      .command
  }

  fn store() -> SqliteStore {
    SqliteStore::open_in_memory(&fuelmon_core::reference::SeedData::new(
      ["Gasoline"],
      ["Toyota"],
    ))
    .unwrap()
  }

  #[test]
  fn fueling_add_parses_typed_arguments() {
    let cmd = parse(&[
      "fueling", "add", "--vehicle", "1", "--date", "2024-02-29", "--odometer", "1050",
      "--station", "Shell", "--quantity", "35", "--cost", "55.5", "--city", "--style",
      "calm",
    ]);
    let Command::Fueling(FuelingCommand::Add(args)) = cmd else {
      panic!("expected `fueling add`");
    };
    assert_eq!(args.vehicle, Some(1));
    assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 2, 29));
    assert!(args.city && !args.road && !args.freeway);
    assert_eq!(args.style, DrivingStyle::Calm);
  }

  #[test]
  fn fueling_add_defaults_to_last_fueled_vehicle() {
    let s = store();
    let out = Output::new(true);
    run(
      &s,
      parse(&[
        "vehicle", "add", "--make", "1", "--model", "Corolla", "--capacity", "50",
        "--registration", "AA-11-AA", "--year", "2015", "--odometer", "1000",
      ]),
      &out,
    )
    .unwrap();
    run(
      &s,
      parse(&[
        "fueling", "add", "--vehicle", "1", "--odometer", "1050", "--station", "Shell",
        "--quantity", "35", "--cost", "55", "--road",
      ]),
      &out,
    )
    .unwrap();
    run(
      &s,
      parse(&[
        "fueling", "add", "--odometer", "1100", "--station", "BP", "--quantity", "30",
        "--cost", "50", "--freeway",
      ]),
      &out,
    )
    .unwrap();

    assert_eq!(s.fuelings().list_by_vehicle(VehicleId(1)).unwrap().len(), 2);
  }

  #[test]
  fn invalid_fueling_is_reported_and_not_stored() {
    let s = store();
    let out = Output::new(true);
    run(
      &s,
      parse(&[
        "vehicle", "add", "--make", "1", "--model", "Corolla", "--capacity", "50",
        "--registration", "AA-11-AA", "--year", "2015", "--odometer", "1000",
      ]),
      &out,
    )
    .unwrap();

    let err = run(
      &s,
      parse(&[
        "fueling", "add", "--vehicle", "1", "--odometer", "1000", "--station", "Shell",
        "--quantity", "35", "--cost", "55", "--city",
      ]),
      &out,
    )
    .unwrap_err();

    assert!(err.to_string().contains("must be greater than 1000"));
    assert!(s.fuelings().list_by_vehicle(VehicleId(1)).unwrap().is_empty());
  }

  #[test]
  fn vehicle_delete_requires_confirmation() {
    let s = store();
    let out = Output::new(true);
    run(
      &s,
      parse(&[
        "vehicle", "add", "--make", "1", "--model", "Corolla", "--capacity", "50",
        "--registration", "AA-11-AA", "--year", "2015",
      ]),
      &out,
    )
    .unwrap();

    assert!(run(&s, parse(&["vehicle", "delete", "1"]), &out).is_err());
    assert_eq!(s.vehicles().count().unwrap(), 1);

    run(&s, parse(&["vehicle", "delete", "1", "--yes"]), &out).unwrap();
    assert_eq!(s.vehicles().count().unwrap(), 0);
  }
}
