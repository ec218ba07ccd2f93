//! Layered configuration: optional TOML file, then `FUELMON_*` environment
//! variables.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use fuelmon_core::reference::SeedData;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Database file; a leading `~/` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Seed list for the `fuel_type` table, used only when the file is created.
  #[serde(default = "default_fuel_types")]
  pub fuel_types: Vec<String>,
  #[serde(default = "default_makes")]
  pub makes:      Vec<String>,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/fuelmon/fuelmon.db") }

fn default_fuel_types() -> Vec<String> { SeedData::default().fuel_types }

fn default_makes() -> Vec<String> { SeedData::default().makes }

impl Settings {
  /// Read `path` if it exists, then apply environment overrides.
  pub fn load(path: &Path) -> Result<Self> {
    let raw = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("FUELMON"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    raw
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  pub fn seed(&self) -> SeedData {
    SeedData {
      fuel_types: self.fuel_types.clone(),
      makes:      self.makes.clone(),
    }
  }

  /// The configured store path with `~` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(settings.seed(), SeedData::default());
  }

  #[test]
  fn file_overrides_seed_lists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fuelmon.toml");
    fs::write(
      &path,
      "store_path = \"/tmp/fleet.db\"\nfuel_types = [\"Diesel\"]\nmakes = [\"Volvo\", \"Scania\"]\n",
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.store_path, PathBuf::from("/tmp/fleet.db"));
    assert_eq!(settings.seed(), SeedData::new(["Diesel"], ["Volvo", "Scania"]));
  }

  #[test]
  fn tilde_is_only_expanded_as_a_prefix() {
    let plain = Path::new("/var/lib/fuel~/db");
    assert_eq!(expand_tilde(plain), plain);
  }
}
