//! This module defines declared boundary conditions: for each of the six
//! local axes, whether it is free, rigid, or an elastic spring.

use log::warn;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::geometry::*;
use crate::util::is_truthy;

/// The condition on a single local axis.
///
/// In the input, `true` means rigid, a positive number is a spring stiffness,
/// and `false`, `null` or an absent key mean free. Anything else also ends up
/// free, with a warning.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum AxisCondition {
  /// No restraint.
  #[default]
  Free,
  /// Fully restrained; becomes a coupling equation.
  Rigid,
  /// Elastically restrained with the given (positive) stiffness.
  Elastic(f64)
}

impl From<Value> for AxisCondition {
  fn from(value: Value) -> Self {
    return match value {
      Value::Bool(true) => Self::Rigid,
      Value::Bool(false) | Value::Null => Self::Free,
      Value::Number(ref n) => match n.as_f64() {
        Some(k) if k > 0.0 && k.is_finite() => Self::Elastic(k),
        _ => {
          warn!("Stiffness {} is not positive, axis will be free.", n);
          Self::Free
        }
      },
      other => {
        warn!("Unrecognised axis condition {}, axis will be free.", other);
        Self::Free
      }
    };
  }
}

impl From<AxisCondition> for Value {
  fn from(value: AxisCondition) -> Self {
    return match value {
      AxisCondition::Free => Value::Bool(false),
      AxisCondition::Rigid => Value::Bool(true),
      AxisCondition::Elastic(k) => Value::from(k),
    };
  }
}

/// Conditions for all six local axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppliedCondition {
  /// Translation along local X.
  pub dx: AxisCondition,
  /// Translation along local Y.
  pub dy: AxisCondition,
  /// Translation along local Z.
  pub dz: AxisCondition,
  /// Rotation about local X.
  pub drx: AxisCondition,
  /// Rotation about local Y.
  pub dry: AxisCondition,
  /// Rotation about local Z.
  pub drz: AxisCondition
}

impl AppliedCondition {
  /// Every axis rigid. This is what an unconfigured relation means.
  pub const fn fully_fixed() -> Self {
    let r = AxisCondition::Rigid;
    return Self { dx: r, dy: r, dz: r, drx: r, dry: r, drz: r };
  }

  /// Every axis elastic with the same stiffness.
  pub fn uniform_spring(k: f64) -> Self {
    let e = AxisCondition::Elastic(k);
    return Self { dx: e, dy: e, dz: e, drx: e, dry: e, drz: e };
  }

  /// Returns the condition for a given DOF.
  pub fn get(&self, dof: Dof) -> AxisCondition {
    return match (dof.dof_type, dof.axis) {
      (DofType::Translational, Axis::X) => self.dx,
      (DofType::Translational, Axis::Y) => self.dy,
      (DofType::Translational, Axis::Z) => self.dz,
      (DofType::Rotational, Axis::X) => self.drx,
      (DofType::Rotational, Axis::Y) => self.dry,
      (DofType::Rotational, Axis::Z) => self.drz,
    };
  }

  /// Iterates over the conditions in the fixed DOF order.
  pub fn iter(&self) -> impl Iterator<Item = (Dof, AxisCondition)> + '_ {
    return Dof::all().iter().map(|d| (*d, self.get(*d)));
  }

  /// Number of rigid axes.
  pub fn rigid_count(&self) -> usize {
    return self.iter()
      .filter(|(_, c)| matches!(c, AxisCondition::Rigid))
      .count();
  }
}

/// Deserializes an optional condition block. An absent, null, false or
/// empty block counts as "nothing declared", which callers tell apart from
/// an explicit all-free block.
pub(crate) fn deserialize_declared<'de, D>(
  de: D
) -> Result<Option<AppliedCondition>, D::Error>
  where D: Deserializer<'de> {
  let raw: Option<Value> = Option::deserialize(de)?;
  return match raw {
    Some(v @ Value::Object(_)) if is_truthy(&v) => {
      serde_json::from_value(v).map(Some).map_err(D::Error::custom)
    },
    Some(v) if is_truthy(&v) => Err(D::Error::custom(format!(
      "expected an object of axis conditions, got {}", v
    ))),
    _ => Ok(None)
  };
}
