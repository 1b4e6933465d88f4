//! This module implements the deck settings: the handful of numbers a
//! command file needs that don't come from the model.
//!
//! They can be read from a TOML file; anything missing takes its default.
//!
//! ```toml
//! gravity = 9.81
//! gravity_direction = [0.0, 0.0, -1.0]
//! mesh_unit = 20
//! result_unit = 80
//! rigid_link_section = [1.0, 1.0]
//! rigid_link_material = 0
//! ```

use std::error::Error;
use std::fmt::Display;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Standard gravity, in m/s².
pub const STANDARD_GRAVITY: f64 = 9.806;

/// Errors when loading deck settings.
#[derive(Debug)]
pub enum SettingsError {
  /// The file couldn't be read.
  Io(io::Error),
  /// The file isn't valid settings.
  Toml(toml::de::Error)
}

impl Display for SettingsError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::Io(e) => write!(f, "could not read settings: {}", e),
      Self::Toml(e) => write!(f, "invalid settings: {}", e),
    };
  }
}

impl Error for SettingsError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    return match self {
      Self::Io(e) => Some(e),
      Self::Toml(e) => Some(e),
    };
  }
}

impl From<io::Error> for SettingsError {
  fn from(value: io::Error) -> Self {
    return Self::Io(value);
  }
}

impl From<toml::de::Error> for SettingsError {
  fn from(value: toml::de::Error) -> Self {
    return Self::Toml(value);
  }
}

/// Settings for the command file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckSettings {
  /// Magnitude of the gravitational acceleration.
  pub gravity: f64,
  /// Direction of gravity, in global coordinates.
  pub gravity_direction: [f64; 3],
  /// Logical unit the mesh is read from.
  pub mesh_unit: usize,
  /// Logical unit results are written to.
  pub result_unit: usize,
  /// Rectangular section dimensions for rigid links.
  pub rigid_link_section: [f64; 2],
  /// Index of the material rigid links are made of.
  pub rigid_link_material: usize
}

impl Default for DeckSettings {
  fn default() -> Self {
    return Self {
      gravity: STANDARD_GRAVITY,
      gravity_direction: [0.0, 0.0, -1.0],
      mesh_unit: 20,
      result_unit: 80,
      rigid_link_section: [1.0, 1.0],
      rigid_link_material: 0
    };
  }
}

impl DeckSettings {
  /// Parses settings from a TOML string.
  pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
    return Ok(toml::from_str(s)?);
  }

  /// Utility method -- reads and parses a TOML file.
  pub fn from_file<P: AsRef<Path>>(p: P) -> Result<Self, SettingsError> {
    let contents = std::fs::read_to_string(p)?;
    return Self::from_toml_str(&contents);
  }
}
