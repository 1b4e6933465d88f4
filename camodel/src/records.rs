//! This module defines the input records, exactly as the model exporter
//! writes them to JSON, and the routines to read them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::conditions::{deserialize_declared, AppliedCondition};
use crate::dimensionality::{ConnectionGeometry, ElementGeometry};
use crate::errors::ModelError;
use crate::geometry::Orientation;
use crate::naming::QualifiedName;
use crate::properties::ReferenceDb;
use crate::util::deserialize_truthy;

/// A relation between an element and a connection, as listed under the
/// element.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationRecord {
  /// The element; if absent, the one this record is listed under.
  #[serde(default)]
  pub relating_element: Option<QualifiedName>,
  /// The connection, by exact name.
  pub related_connection: QualifiedName,
  /// What the relation restrains; nothing declared means fully fixed.
  #[serde(default, deserialize_with = "deserialize_declared")]
  pub applied_condition: Option<AppliedCondition>,
  /// Whether the element attaches away from the analytical node.
  #[serde(default, deserialize_with = "deserialize_truthy")]
  pub eccentricity: bool,
  /// Local frame of the relation; if absent, the connection's.
  #[serde(default)]
  pub orientation: Option<Orientation>
}

/// A structural member.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
  /// Qualified name.
  pub ifc_name: QualifiedName,
  /// Dimensionality.
  pub geometry_type: ElementGeometry,
  /// Local frame.
  pub orientation: Orientation,
  /// Thickness, for surface members.
  #[serde(default)]
  pub thickness: Option<f64>,
  /// The member's relations, in order.
  #[serde(default)]
  pub connections: Vec<RelationRecord>
}

/// A connection: a point, edge or face where members meet or are supported.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
  /// Qualified name.
  pub ifc_name: QualifiedName,
  /// Dimensionality.
  pub geometry_type: ConnectionGeometry,
  /// Local frame.
  pub orientation: Orientation,
  /// Support condition against the ground; nothing declared means none.
  #[serde(default, deserialize_with = "deserialize_declared")]
  pub applied_condition: Option<AppliedCondition>
}

/// A whole model as read from the input.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ModelRecords {
  /// Members, in input order.
  #[serde(default)]
  pub elements: Vec<ElementRecord>,
  /// Connections, in input order.
  #[serde(default)]
  pub connections: Vec<ConnectionRecord>,
  /// Materials and profiles.
  #[serde(default)]
  pub db: ReferenceDb
}

impl ModelRecords {
  /// Parses records from a JSON string.
  pub fn from_json_str(s: &str) -> Result<Self, ModelError> {
    return Ok(serde_json::from_str(s)?);
  }

  /// Parses records from any reader.
  pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
    return Ok(serde_json::from_reader(reader)?);
  }

  /// Utility method -- reads and parses a file.
  pub fn from_file<P: AsRef<Path>>(p: P) -> Result<Self, ModelError> {
    let file = File::open(p.as_ref())?;
    return Self::from_reader(BufReader::new(file));
  }
}
