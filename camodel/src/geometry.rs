//! This module defines basic geometric concepts: the six degrees of freedom as
//! the solver names them, local frames, and per-DOF storage.

use std::fmt::Display;

use nalgebra::{Matrix3, RowVector3, Scalar, Vector3};
use serde::{Deserialize, Serialize};

/// Degrees of freedom per node.
pub const SIXDOF: usize = 6;

/// X-translation DOF for short.
pub const DOF_DX: Dof = Dof { dof_type: DofType::Translational, axis: Axis::X };

/// Y-translation DOF for short.
pub const DOF_DY: Dof = Dof { dof_type: DofType::Translational, axis: Axis::Y };

/// Z-translation DOF for short.
pub const DOF_DZ: Dof = Dof { dof_type: DofType::Translational, axis: Axis::Z };

/// X-rotation DOF for short.
pub const DOF_DRX: Dof = Dof { dof_type: DofType::Rotational, axis: Axis::X };

/// Y-rotation DOF for short.
pub const DOF_DRY: Dof = Dof { dof_type: DofType::Rotational, axis: Axis::Y };

/// Z-rotation DOF for short.
pub const DOF_DRZ: Dof = Dof { dof_type: DofType::Rotational, axis: Axis::Z };

/// The two type of degree of freedom.
#[derive(
  Copy, Clone, Debug, Serialize, Deserialize, PartialOrd, Ord, PartialEq, Eq
)]
pub enum DofType {
  /// Translational DOF.
  Translational,
  /// Rotational DOF.
  Rotational
}

impl Display for DofType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.prefix());
  }
}

impl DofType {
  /// Returns the upper-case prefix the solver uses for this DOF type.
  pub const fn prefix(&self) -> &'static str {
    return match self {
      DofType::Translational => "D",
      DofType::Rotational => "DR",
    };
  }
}

/// The three axes.
#[derive(
  Copy, Clone, Debug, Serialize, Deserialize, PartialOrd, Ord, PartialEq, Eq
)]
pub enum Axis {
  /// The X axis.
  X,
  /// The Y axis.
  Y,
  /// The Z axis.
  Z,
}

impl From<Axis> for usize {
  fn from(value: Axis) -> Self {
    return value.number();
  }
}

impl Display for Axis {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.letter());
  }
}

impl Axis {
  /// Returns this axis' upper-case letter.
  pub const fn letter(&self) -> char {
    return match self {
      Axis::X => 'X',
      Axis::Y => 'Y',
      Axis::Z => 'Z',
    };
  }

  /// Returns this axis' number 1-3.
  pub const fn number(&self) -> usize {
    return match self {
      Axis::X => 1,
      Axis::Y => 2,
      Axis::Z => 3,
    };
  }

  /// Returns this axis' zero-based index into vectors and matrices.
  pub const fn index(&self) -> usize {
    return self.number() - 1;
  }
}

/// The six degrees of freedom.
#[derive(
  Copy, Clone, Debug, Serialize, Deserialize, PartialOrd, Ord, PartialEq, Eq
)]
pub struct Dof {
  /// The type of DOF (translational or rotational).
  pub dof_type: DofType,
  /// The axis of the DOF (X/Y/Z).
  pub axis: Axis
}

impl From<Dof> for usize {
  fn from(value: Dof) -> Self {
    let added = if value.dof_type == DofType::Rotational { 3 } else { 0 };
    return usize::from(value.axis) + added;
  }
}

impl TryFrom<usize> for Dof {
  type Error = ();

  fn try_from(value: usize) -> Result<Self, Self::Error> {
    return Self::all().get(value.wrapping_sub(1)).copied().ok_or(());
  }
}

impl Display for Dof {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.solver_name());
  }
}

impl Dof {
  /// Returns all DOF in order: DX, DY, DZ, DRX, DRY, DRZ.
  pub const fn all() -> &'static [Self; SIXDOF] {
    return &[DOF_DX, DOF_DY, DOF_DZ, DOF_DRX, DOF_DRY, DOF_DRZ];
  }

  /// Returns the solver's name for the DOF, like DX or DRZ.
  pub const fn solver_name(&self) -> &'static str {
    return match (self.dof_type, self.axis) {
      (DofType::Translational, Axis::X) => "DX",
      (DofType::Translational, Axis::Y) => "DY",
      (DofType::Translational, Axis::Z) => "DZ",
      (DofType::Rotational, Axis::X) => "DRX",
      (DofType::Rotational, Axis::Y) => "DRY",
      (DofType::Rotational, Axis::Z) => "DRZ",
    };
  }

  /// Returns the zero-based position of this DOF in six-slot vectors.
  pub fn index(&self) -> usize {
    return usize::from(*self) - 1;
  }

  /// Returns the three global DOFs of the same type as this one. A rigid
  /// local axis always couples all three of them.
  pub const fn coupled(&self) -> [Dof; 3] {
    return match self.dof_type {
      DofType::Translational => [DOF_DX, DOF_DY, DOF_DZ],
      DofType::Rotational => [DOF_DRX, DOF_DRY, DOF_DRZ],
    };
  }
}

/// Holds some kind of data for every degree of freedom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerDof<T: Scalar> {
  /// The data for the three translational degrees of freedom.
  t: Vector3<T>,
  /// The data for the three rotational degrees of freedom.
  r: Vector3<T>
}

impl<T: Scalar> PerDof<T> {
  /// Accesses a value given a dof.
  pub fn get(&self, dof: Dof) -> &T {
    let vec = match dof.dof_type {
      DofType::Translational => &self.t,
      DofType::Rotational => &self.r,
    };
    return &vec[dof.axis.index()];
  }

  /// Overwrites the value for a dof.
  pub fn set(&mut self, dof: Dof, value: T) {
    let vec = match dof.dof_type {
      DofType::Translational => &mut self.t,
      DofType::Rotational => &mut self.r,
    };
    vec[dof.axis.index()] = value;
  }

  /// Iterates over the values in DOF order.
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    return self.t.iter().chain(self.r.iter());
  }
}

impl PerDof<f64> {
  /// All-zero values, i.e. no stiffness anywhere.
  pub fn zeros() -> Self {
    return Self { t: Vector3::zeros(), r: Vector3::zeros() };
  }

  /// Returns true if every value is zero.
  pub fn is_zero(&self) -> bool {
    return self.iter().all(|x| *x == 0.0);
  }

  /// Copies the values out, in DOF order.
  pub fn to_array(&self) -> [f64; SIXDOF] {
    return [self.t.x, self.t.y, self.t.z, self.r.x, self.r.y, self.r.z];
  }
}

impl Default for PerDof<f64> {
  fn default() -> Self {
    return Self::zeros();
  }
}

/// A local frame as a direction-cosine matrix. Row `i` is local axis `i`
/// expressed in global coordinates, which is also how the input lists it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 3]; 3]", into = "[[f64; 3]; 3]")]
pub struct Orientation(Matrix3<f64>);

impl From<[[f64; 3]; 3]> for Orientation {
  fn from(rows: [[f64; 3]; 3]) -> Self {
    let rows = rows.map(|r| RowVector3::new(r[0], r[1], r[2]));
    return Self(Matrix3::from_rows(&rows));
  }
}

impl From<Orientation> for [[f64; 3]; 3] {
  fn from(value: Orientation) -> Self {
    let m = value.0;
    return [0, 1, 2].map(|i| [m[(i, 0)], m[(i, 1)], m[(i, 2)]]);
  }
}

impl Default for Orientation {
  fn default() -> Self {
    return Self::identity();
  }
}

impl Orientation {
  /// The global frame.
  pub fn identity() -> Self {
    return Self(Matrix3::identity());
  }

  /// Returns a local axis in global components.
  pub fn local_axis(&self, axis: Axis) -> Vector3<f64> {
    return project_local_axis(&self.0, axis);
  }

  /// Returns the two first local axes, concatenated, as the solver wants
  /// them when orienting discrete elements.
  pub fn local_xy(&self) -> [f64; 6] {
    let x = self.local_axis(Axis::X);
    let y = self.local_axis(Axis::Y);
    return [x.x, x.y, x.z, y.x, y.y, y.z];
  }
}

/// Projects a local axis onto the global axes: the matching column of the
/// transposed direction-cosine matrix.
pub fn project_local_axis(orientation: &Matrix3<f64>, axis: Axis) -> Vector3<f64> {
  let transposed = orientation.transpose();
  return transposed.column(axis.index()).into_owned();
}
