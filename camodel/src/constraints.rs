//! This module turns declared per-axis conditions into what the solver
//! needs: coupling equations for rigid axes and a stiffness vector for
//! elastic ones.
//!
//! Ground restraints tie a single group to the ground, so each equation has
//! three terms. Relations tie two groups together, so each equation has six:
//! three on the first group and the same three, negated, on the second.
//! Axes are always visited in the order DX, DY, DZ, DRX, DRY, DRZ.

use serde::{Deserialize, Serialize};

use crate::conditions::*;
use crate::geometry::*;
use crate::naming::GroupName;

/// One term of a coupling equation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Term {
  /// The group whose DOF participates.
  pub group: GroupName,
  /// The global DOF.
  pub dof: Dof,
  /// The multiplier.
  pub coefficient: f64
}

/// A homogeneous linear equation over group DOFs: the sum of the terms is
/// zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CouplingEquation {
  /// The terms, grouped by side: the first three on the first group, the
  /// next three (if any) on the second.
  pub terms: Vec<Term>
}

impl CouplingEquation {
  /// The group of every term.
  pub fn groups(&self) -> impl Iterator<Item = &GroupName> {
    return self.terms.iter().map(|t| &t.group);
  }

  /// The DOF of every term.
  pub fn dofs(&self) -> impl Iterator<Item = Dof> + '_ {
    return self.terms.iter().map(|t| t.dof);
  }

  /// The coefficient of every term.
  pub fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
    return self.terms.iter().map(|t| t.coefficient);
  }

  /// The terms on each side of the equation. For a ground restraint the
  /// second side is empty.
  pub fn sides(&self) -> (&[Term], &[Term]) {
    return self.terms.split_at(self.terms.len().min(3));
  }
}

/// What a relation or ground restraint compiles to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledConstraints {
  /// One equation per rigid axis, in axis order.
  pub equations: Vec<CouplingEquation>,
  /// Stiffness per axis; zero where the axis isn't elastic.
  pub stiffnesses: PerDof<f64>
}

impl CompiledConstraints {
  /// No equations, no stiffness.
  pub fn unconstrained() -> Self {
    return Self { equations: Vec::new(), stiffnesses: PerDof::zeros() };
  }

  /// Whether this compiled to nothing at all.
  pub fn is_empty(&self) -> bool {
    return self.equations.is_empty() && self.stiffnesses.is_zero();
  }
}

/// Resolves a ground restraint. Nothing declared means nothing restrained.
pub fn resolve_restraint(
  group: &GroupName,
  orientation: &Orientation,
  condition: Option<&AppliedCondition>
) -> CompiledConstraints {
  return match condition {
    Some(c) => resolve(&[(group, 1.0)], orientation, c),
    None => CompiledConstraints::unconstrained()
  };
}

/// Resolves a relation between two groups. Nothing declared means fully
/// fixed.
pub fn resolve_relation(
  first: &GroupName,
  second: &GroupName,
  orientation: &Orientation,
  condition: Option<&AppliedCondition>
) -> CompiledConstraints {
  let condition = condition.copied().unwrap_or(AppliedCondition::fully_fixed());
  return resolve(&[(first, 1.0), (second, -1.0)], orientation, &condition);
}

/// The per-axis walk shared by both entry points. Each side is a group and
/// the sign its coefficients get.
fn resolve(
  sides: &[(&GroupName, f64)],
  orientation: &Orientation,
  condition: &AppliedCondition
) -> CompiledConstraints {
  let mut compiled = CompiledConstraints::unconstrained();
  for (dof, axis_condition) in condition.iter() {
    match axis_condition {
      AxisCondition::Rigid => {
        let direction = orientation.local_axis(dof.axis);
        let mut terms = Vec::with_capacity(3*sides.len());
        for (group, sign) in sides {
          for (global, component) in dof.coupled().iter().zip(direction.iter()) {
            terms.push(Term {
              group: GroupName::clone(group),
              dof: *global,
              coefficient: sign * component
            });
          }
        }
        compiled.equations.push(CouplingEquation { terms });
      },
      AxisCondition::Elastic(k) => compiled.stiffnesses.set(dof, k),
      AxisCondition::Free => {}
    }
  }
  return compiled;
}
