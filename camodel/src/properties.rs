//! This module defines the reference database: materials and cross-section
//! profiles, each with the list of members they apply to.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::naming::QualifiedName;

/// The reference data shipped alongside the model.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceDb {
  /// Materials, in input order.
  pub materials: Vec<MaterialRecord>,
  /// Profiles, in input order.
  pub profiles: Vec<ProfileRecord>
}

/// Mechanical properties of a material.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialMechProps {
  /// Young's modulus.
  pub young_modulus: f64,
  /// Poisson's ratio, if known.
  #[serde(default)]
  pub poisson_ratio: Option<f64>,
  /// Shear modulus, if known.
  #[serde(default)]
  pub shear_modulus: Option<f64>
}

/// Non-mechanical properties of a material.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCommonProps {
  /// Mass density, used for self-weight.
  pub mass_density: f64
}

/// A material and the members made of it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
  /// Optional human name; not used for naming groups.
  #[serde(default)]
  pub name: Option<String>,
  /// Mechanical properties.
  pub mech_props: MaterialMechProps,
  /// Common properties.
  pub common_props: MaterialCommonProps,
  /// Members made of this material.
  #[serde(default)]
  pub related_elements: Vec<QualifiedName>
}

impl MaterialRecord {
  /// Young's modulus.
  pub fn young_modulus(&self) -> f64 {
    return self.mech_props.young_modulus;
  }

  /// Mass density.
  pub fn mass_density(&self) -> f64 {
    return self.common_props.mass_density;
  }

  /// Poisson's ratio: given directly, else derived from the shear modulus
  /// as `E/2G - 1`, else zero.
  pub fn poisson_ratio(&self) -> f64 {
    let props = &self.mech_props;
    if let Some(nu) = props.poisson_ratio {
      return nu;
    }
    if let Some(g) = props.shear_modulus {
      return props.young_modulus / 2.0 / g - 1.0;
    }
    debug!(
      "Material {} has neither Poisson ratio nor shear modulus, using 0.",
      self.name.as_deref().unwrap_or("<unnamed>")
    );
    return 0.0;
  }
}

/// Computed section properties of a profile.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProps {
  /// Cross-section area.
  pub cross_section_area: f64,
  /// Second moment of area about local Y.
  pub moment_of_inertia_y: f64,
  /// Second moment of area about local Z.
  pub moment_of_inertia_z: f64,
  /// Torsional constant.
  pub torsional_constant_x: f64
}

/// A profile and the members that use it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
  /// Optional human name.
  #[serde(default)]
  pub name: Option<String>,
  /// Shape family, like `rectangular` or `iSymmetrical`.
  pub profile_shape: String,
  /// Profile type; only `AREA` profiles become sections.
  pub profile_type: String,
  /// Width, for rectangular shapes.
  #[serde(default)]
  pub x_dim: Option<f64>,
  /// Depth, for rectangular shapes.
  #[serde(default)]
  pub y_dim: Option<f64>,
  /// Computed properties, for general shapes.
  #[serde(default)]
  pub mech_props: Option<SectionProps>,
  /// Members using this profile.
  #[serde(default)]
  pub related_elements: Vec<QualifiedName>
}

/// How a profile is described to the solver.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BeamSection {
  /// Solid rectangle given by its two dimensions.
  Rectangle {
    /// Dimension along local Y.
    hy: f64,
    /// Dimension along local Z.
    hz: f64
  },
  /// Arbitrary section given by its properties.
  General {
    /// Area.
    area: f64,
    /// Second moment about local Y.
    iy: f64,
    /// Second moment about local Z.
    iz: f64,
    /// Torsional constant.
    jx: f64
  }
}

impl BeamSection {
  /// The solver's section keyword.
  pub const fn keyword(&self) -> &'static str {
    return match self {
      Self::Rectangle { .. } => "RECTANGLE",
      Self::General { .. } => "GENERALE",
    };
  }

  /// The solver's names for the values, in order.
  pub const fn characteristics(&self) -> &'static [&'static str] {
    return match self {
      Self::Rectangle { .. } => &["HY", "HZ"],
      Self::General { .. } => &["A", "IY", "IZ", "JX"],
    };
  }

  /// The values, in the same order as [`Self::characteristics`].
  pub fn values(&self) -> Vec<f64> {
    return match self {
      Self::Rectangle { hy, hz } => vec![*hy, *hz],
      Self::General { area, iy, iz, jx } => vec![*area, *iy, *iz, *jx],
    };
  }
}

impl ProfileRecord {
  /// Works out the section, if the profile is one we know how to describe.
  pub fn section(&self) -> Option<BeamSection> {
    if self.profile_type != "AREA" {
      return None;
    }
    return match self.profile_shape.as_str() {
      "rectangular" => Some(BeamSection::Rectangle {
        hy: self.x_dim?,
        hz: self.y_dim?
      }),
      "iSymmetrical" => self.mech_props.as_ref().map(|p| BeamSection::General {
        area: p.cross_section_area,
        iy: p.moment_of_inertia_y,
        iz: p.moment_of_inertia_z,
        jx: p.torsional_constant_x
      }),
      _ => None
    };
  }
}
