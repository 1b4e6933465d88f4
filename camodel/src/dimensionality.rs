//! This module defines the geometric dimensionality of elements and
//! connections, and how each maps to a solver element formulation.
//!
//! Classification happens once, when the records are read; nothing here is
//! ever revisited afterwards.

use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The element formulations the solver is asked to use.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Formulation {
  /// Euler-Bernoulli beam, used for linear members and rigid links.
  Beam,
  /// Thin plate/shell, used for planar members.
  Plate,
  /// Discrete translational and rotational spring.
  DiscreteSpring
}

impl Formulation {
  /// Returns the solver's modelisation keyword.
  pub const fn name(&self) -> &'static str {
    return match self {
      Self::Beam => "POU_D_E",
      Self::Plate => "DKT",
      Self::DiscreteSpring => "DIS_TR",
    };
  }
}

impl Display for Formulation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.name());
  }
}

/// Dimensionality of a structural member.
#[derive(
  Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
  ValueEnum
)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum ElementGeometry {
  /// Linear members: beams, columns, braces.
  Line,
  /// Planar members: slabs, walls.
  Surface
}

impl ElementGeometry {
  /// Returns all element dimensionalities.
  pub const fn all() -> &'static [Self] {
    return &[Self::Line, Self::Surface];
  }

  /// Returns the lowercase name, as used in the input.
  pub const fn name(&self) -> &'static str {
    return match self {
      Self::Line => "line",
      Self::Surface => "surface",
    };
  }

  /// The formulation members of this dimensionality get.
  pub const fn formulation(&self) -> Formulation {
    return match self {
      Self::Line => Formulation::Beam,
      Self::Surface => Formulation::Plate,
    };
  }
}

impl Display for ElementGeometry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.name());
  }
}

/// Dimensionality of a connection.
#[derive(
  Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
  ValueEnum
)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum ConnectionGeometry {
  /// A single point, e.g. a beam end or a column base.
  Point,
  /// An edge, e.g. a slab resting on a wall.
  Line,
  /// A face.
  Surface
}

impl ConnectionGeometry {
  /// Returns all connection dimensionalities.
  pub const fn all() -> &'static [Self] {
    return &[Self::Point, Self::Line, Self::Surface];
  }

  /// Returns the lowercase name, as used in the input.
  pub const fn name(&self) -> &'static str {
    return match self {
      Self::Point => "point",
      Self::Line => "line",
      Self::Surface => "surface",
    };
  }

  /// The formulation for the connection's own discrete elements.
  pub const fn formulation(&self) -> Formulation {
    return Formulation::DiscreteSpring;
  }

  /// The tag that joins element and connection names in a relation's
  /// primary group.
  pub const fn relation_tag(&self) -> &'static str {
    return match self {
      Self::Point => "_0DC_",
      Self::Line => "_1DC_",
      Self::Surface => "_2DC_",
    };
  }

  /// Whether relations at this kind of connection get their own spring
  /// group.
  pub const fn has_relation_springs(&self) -> bool {
    return matches!(self, Self::Point);
  }
}

impl Display for ConnectionGeometry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.name());
  }
}
