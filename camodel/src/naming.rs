//! This module implements the naming scheme that turns hierarchical entity
//! names into short solver group names.
//!
//! Group names are keys shared by every section of the command file, so they
//! have to come out the same every time they're derived. Everything here is a
//! pure function of its inputs.
//!
//! Two different names whose first segments contain the same upper-case
//! letters, with the same discriminator, will alias. There is no collision
//! detection; callers that want some should wrap [`group_name`].

use std::error::Error;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Separates the segments of a qualified name.
pub const SEPARATOR: char = '|';

/// Joins a connection's group to an element's when the element attaches
/// eccentrically, and a connection's group to an eccentricity index.
pub const ECCENTRIC_TAG: &str = "_0DC_";

/// Joins an element's and a connection's group into a spring group.
pub const SPRING_TAG: &str = "_1DS_";

/// Joins an element's and a connection's group into a rigid-link group.
pub const RIGID_LINK_TAG: &str = "_1DR_";

/// Appended to a connection's group to name its discrete node group.
pub const NODE_SUFFIX: &str = "_0D";

/// A qualified name was missing its discriminator segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidQualifiedName(pub String);

impl Display for InvalidQualifiedName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(
      f,
      "\"{}\" is not a qualified name (expected \"<path>{}<id>\")",
      self.0,
      SEPARATOR
    );
  }
}

impl Error for InvalidQualifiedName {}

/// A hierarchical, pipe-delimited entity name, like
/// `IfcStructuralCurveMember|2w9nf7tOH5NQMX$ZyHg4dJ`.
#[derive(
  Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash
)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName(String);

impl TryFrom<String> for QualifiedName {
  type Error = InvalidQualifiedName;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    if value.contains(SEPARATOR) {
      return Ok(Self(value));
    }
    return Err(InvalidQualifiedName(value));
  }
}

impl TryFrom<&str> for QualifiedName {
  type Error = InvalidQualifiedName;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    return Self::try_from(value.to_owned());
  }
}

impl From<QualifiedName> for String {
  fn from(value: QualifiedName) -> Self {
    return value.0;
  }
}

impl Display for QualifiedName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.0);
  }
}

impl QualifiedName {
  /// The full name.
  pub fn as_str(&self) -> &str {
    return &self.0;
  }

  /// The first segment, usually a dotted or camel-cased type path.
  pub fn path(&self) -> &str {
    return self.segments().0;
  }

  /// The second segment, the local discriminator. Further segments are
  /// ignored.
  pub fn discriminator(&self) -> &str {
    return self.segments().1;
  }

  /// Splits off the first two segments.
  fn segments(&self) -> (&str, &str) {
    let mut parts = self.0.split(SEPARATOR);
    let path = parts.next().unwrap_or_default();
    let discriminator = parts.next().unwrap_or_default();
    return (path, discriminator);
  }
}

/// A solver group name.
#[derive(
  Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
  derive_more::From
)]
#[serde(transparent)]
pub struct GroupName(String);

impl Display for GroupName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.0);
  }
}

impl AsRef<str> for GroupName {
  fn as_ref(&self) -> &str {
    return &self.0;
  }
}

impl GroupName {
  /// The name as a string slice.
  pub fn as_str(&self) -> &str {
    return &self.0;
  }

  /// Returns a new group name with something appended.
  pub fn suffixed<D: Display>(&self, suffix: D) -> Self {
    return Self(format!("{}{}", self.0, suffix));
  }

  /// Returns `{self}{tag}{other}`.
  pub fn joined(&self, tag: &str, other: &GroupName) -> Self {
    return Self(format!("{}{}{}", self.0, tag, other.0));
  }
}

/// Derives the group name for a qualified name: the upper-case letters of
/// the first segment, an underscore, then the discriminator verbatim.
pub fn group_name(name: &QualifiedName) -> GroupName {
  let initials: String = name.path()
    .chars()
    .filter(|c| c.is_uppercase())
    .collect();
  return GroupName(format!("{}_{}", initials, name.discriminator()));
}

/// Derives the group name for a connection's discrete node group.
pub fn node_group_name(connection: &QualifiedName) -> GroupName {
  return group_name(connection).suffixed(NODE_SUFFIX);
}
