//! This module lays out a compiled model as a linear-static command file
//! with self-weight: which commands go in, in what order, and what each one
//! says about the model's groups.
//!
//! Everything is built in memory first. Nothing is written anywhere until
//! the whole deck has rendered.

use std::fmt::{Display, Write};

use camodel::prelude::*;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::command::*;
use crate::settings::DeckSettings;

/// Result name of the mesh.
pub const MESH: &str = "mesh";
/// Result name of the model.
pub const MODEL: &str = "model";
/// Result name of the material field.
pub const MATERIAL: &str = "material";
/// Result name of the element characteristics.
pub const ELEMENT: &str = "element";
/// Result name of the supports and constraints.
pub const LIAISONS: &str = "liaisons";
/// Result name of the gravity load.
pub const GRAVITY_LOAD: &str = "gravLoad";
/// Result name of the static solution.
pub const SOLUTION: &str = "res_Bld";

/// Returns the result name of the i-th material.
pub fn material_name(index: usize) -> String {
  return format!("mat_{}", index);
}

/// The steps of a command file, in the order they're written.
#[derive(
  Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord
)]
pub enum DeckStep {
  /// `DEBUT`.
  Initialize,
  /// `LIRE_MAILLAGE`.
  ReadMesh,
  /// `AFFE_MODELE`.
  DefineModel,
  /// `DEFI_MATERIAU` and `AFFE_MATERIAU`.
  DefineMaterials,
  /// `AFFE_CARA_ELEM`.
  DefineElements,
  /// `AFFE_CHAR_MECA` with the liaisons.
  DefineConstraints,
  /// `AFFE_CHAR_MECA` with gravity.
  DefineLoad,
  /// `MECA_STATIQUE`.
  RunAnalysis,
  /// `IMPR_RESU`.
  ExportResults,
  /// `FIN`.
  Conclude
}

impl DeckStep {
  /// Returns all steps, in order.
  pub const fn all() -> &'static [Self] {
    return &[
      Self::Initialize,
      Self::ReadMesh,
      Self::DefineModel,
      Self::DefineMaterials,
      Self::DefineElements,
      Self::DefineConstraints,
      Self::DefineLoad,
      Self::RunAnalysis,
      Self::ExportResults,
      Self::Conclude
    ];
  }

  /// The comment line that introduces the step.
  pub const fn heading(&self) -> &'static str {
    return match self {
      Self::Initialize => "INITIALIZE STUDY",
      Self::ReadMesh => "READ MED FILE",
      Self::DefineModel => "DEFINE MODEL",
      Self::DefineMaterials => "DEFINE MATERIALS",
      Self::DefineElements => "DEFINE ELEMENTS",
      Self::DefineConstraints => "DEFINE SUPPORTS AND CONSTRAINTS",
      Self::DefineLoad => "DEFINE LOAD",
      Self::RunAnalysis => "RUN ANALYSIS",
      Self::ExportResults => "DEFORMED SHAPE EXTRACTION",
      Self::Conclude => "CONCLUDE STUDY",
    };
  }
}

impl Display for DeckStep {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "# STEP: {}", self.heading());
  }
}

/// A step and its commands.
#[derive(Clone, Debug)]
pub struct DeckSection {
  /// Which step.
  pub step: DeckStep,
  /// The commands, in order.
  pub commands: Vec<Command>
}

/// A fully laid-out command file.
#[derive(Clone, Debug)]
pub struct CommandFile {
  /// Comment lines at the top.
  pub header: Vec<String>,
  /// The sections, in step order.
  pub sections: Vec<DeckSection>
}

impl Display for CommandFile {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for line in self.header.iter() {
      if line.is_empty() {
        writeln!(f)?;
      } else {
        writeln!(f, "# {}", line)?;
      }
    }
    for section in self.sections.iter() {
      write!(f, "\n{}\n", section.step)?;
      for (i, command) in section.commands.iter().enumerate() {
        if i > 0 {
          f.write_char('\n')?;
        }
        writeln!(f, "{}", command)?;
      }
    }
    return Ok(());
  }
}

impl CommandFile {
  /// Lays out the command file for a compiled model.
  pub fn assemble(graph: &ConnectionGraph, settings: &DeckSettings) -> Self {
    let assembler = DeckAssembler { graph, settings };
    let sections = DeckStep::all().iter()
      .map(|step| DeckSection {
        step: *step,
        commands: assembler.commands(*step)
      })
      .collect::<Vec<_>>();
    info!(
      "Laid out {} commands in {} steps.",
      sections.iter().map(|s| s.commands.len()).sum::<usize>(),
      sections.len()
    );
    return Self {
      header: vec![
        "Command file generated by model2comm".to_owned(),
        String::new(),
        "Linear Static Analysis With Self-Weight".to_owned()
      ],
      sections
    };
  }

  /// Renders the whole command file to a string.
  pub fn render(&self) -> String {
    return self.to_string();
  }

  /// Finds the section for a step.
  pub fn section(&self, step: DeckStep) -> Option<&DeckSection> {
    return self.sections.iter().find(|s| s.step == step);
  }

  /// Finds a command by operator, in any section.
  pub fn command(&self, operator: &str) -> Option<&Command> {
    return self.commands().find(|c| c.operator == operator);
  }

  /// Every command, in order.
  pub fn commands(&self) -> impl Iterator<Item = &Command> {
    return self.sections.iter().flat_map(|s| s.commands.iter());
  }
}

/// Lays out one command file.
struct DeckAssembler<'a> {
  /// The compiled model.
  graph: &'a ConnectionGraph,
  /// The settings.
  settings: &'a DeckSettings
}

/// Shorthand for the `PHENOMENE`/`MODELISATION` factor.
fn modelisation<I>(groups: I, formulation: &str) -> Vec<Keyword>
  where I: IntoIterator<Item = GroupName> {
  return vec![
    Keyword::tuple("GROUP_MA", groups),
    Keyword::lit("PHENOMENE", "MECANIQUE"),
    Keyword::lit("MODELISATION", formulation)
  ];
}

/// Shorthand for a discrete stiffness factor.
fn discrete(group: &GroupName, cara: &str, stiffnesses: &PerDof<f64>) -> Vec<Keyword> {
  return vec![
    Keyword::lit("GROUP_MA", group),
    Keyword::lit("CARA", cara),
    Keyword::tuple("VALE", stiffnesses.to_array()),
    Keyword::lit("REPERE", "LOCAL")
  ];
}

/// Shorthand for an orientation factor.
fn orientation<I>(group: &GroupName, cara: &str, values: I) -> Vec<Keyword>
  where I: IntoIterator<Item = f64> {
  return vec![
    Keyword::lit("GROUP_MA", group),
    Keyword::lit("CARA", cara),
    Keyword::tuple("VALE", values)
  ];
}

/// A coupling equation as a `LIAISON_DDL` factor.
fn liaison_ddl(eq: &CouplingEquation) -> Vec<Keyword> {
  return vec![
    Keyword::tuple("GROUP_NO", eq.groups()),
    Keyword::tuple("DDL", eq.dofs()),
    Keyword::tuple("COEF_MULT", eq.coefficients()),
    Keyword::lit("COEF_IMPO", 0.0)
  ];
}

/// A coupling equation as a `LIAISON_GROUP` factor. A ground restraint
/// only has one side, so its group is paired with itself at zero weight.
fn liaison_group(eq: &CouplingEquation) -> Vec<Keyword> {
  let (first, second) = eq.sides();
  let (second, weights): (&[Term], Vec<f64>) = if second.is_empty() {
    (first, vec![0.0; first.len()])
  } else {
    (second, second.iter().map(|t| t.coefficient).collect())
  };
  let head_group = |side: &[Term]| -> Vec<GroupName> {
    return side.first().map(|t| t.group.clone()).into_iter().collect();
  };
  return vec![
    Keyword::tuple("GROUP_NO_1", head_group(first)),
    Keyword::tuple("GROUP_NO_2", head_group(second)),
    Keyword::tuple("DDL_1", first.iter().map(|t| t.dof)),
    Keyword::tuple("DDL_2", second.iter().map(|t| t.dof)),
    Keyword::tuple("COEF_MULT_1", first.iter().map(|t| t.coefficient)),
    Keyword::tuple("COEF_MULT_2", weights),
    Keyword::lit("COEF_IMPO", 0.0)
  ];
}

impl<'a> DeckAssembler<'a> {
  /// The commands for a step.
  fn commands(&self, step: DeckStep) -> Vec<Command> {
    debug!("Laying out step {:?}.", step);
    return match step {
      DeckStep::Initialize => vec![Command::new(
        "DEBUT",
        vec![Keyword::lit("PAR_LOT", "NON")]
      )],
      DeckStep::ReadMesh => vec![Command::bound(MESH, "LIRE_MAILLAGE", vec![
        Keyword::lit("FORMAT", "MED"),
        Keyword::lit("UNITE", self.settings.mesh_unit)
      ])],
      DeckStep::DefineModel => vec![self.model()],
      DeckStep::DefineMaterials => self.materials(),
      DeckStep::DefineElements => vec![self.element_characteristics()],
      DeckStep::DefineConstraints => vec![self.liaisons()],
      DeckStep::DefineLoad => vec![self.gravity()],
      DeckStep::RunAnalysis => vec![Command::bound(
        SOLUTION,
        "MECA_STATIQUE",
        vec![
          Keyword::result("MODELE", MODEL),
          Keyword::result("CHAM_MATER", MATERIAL),
          Keyword::result("CARA_ELEM", ELEMENT),
          Keyword::facts("EXCIT", vec![
            vec![Keyword::result("CHARGE", LIAISONS)],
            vec![Keyword::result("CHARGE", GRAVITY_LOAD)]
          ])
        ]
      )],
      DeckStep::ExportResults => vec![Command::new("IMPR_RESU", vec![
        Keyword::lit("FORMAT", "MED"),
        Keyword::lit("UNITE", self.settings.result_unit),
        Keyword::fact("RESU", vec![
          Keyword::result("RESULTAT", SOLUTION),
          Keyword::tuple("NOM_CHAM", ["DEPL"]),
          Keyword::tuple("NOM_CHAM_MED", ["Bld_DISP"])
        ])
      ])],
      DeckStep::Conclude => vec![Command::new("FIN", Vec::new())],
    };
  }

  /// `AFFE_MODELE`: a 3D default, then one factor per formulation with
  /// anything in it.
  fn model(&self) -> Command {
    let graph = self.graph;
    let mut affe = vec![vec![
      Keyword::lit("TOUT", "OUI"),
      Keyword::lit("PHENOMENE", "MECANIQUE"),
      Keyword::lit("MODELISATION", "3D")
    ]];
    for geometry in [ElementGeometry::Surface, ElementGeometry::Line] {
      let groups = graph.element_groups(geometry);
      if !groups.is_empty() {
        affe.push(modelisation(groups, geometry.formulation().name()));
      }
    }
    // point nodes carry their relation springs along
    let point_nodes = graph.node_groups(ConnectionGeometry::Point);
    if !point_nodes.is_empty() {
      let groups = point_nodes.into_iter().chain(graph.spring_groups());
      affe.push(modelisation(groups, ConnectionGeometry::Point.formulation().name()));
    }
    let line_nodes = graph.node_groups(ConnectionGeometry::Line);
    if !line_nodes.is_empty() {
      affe.push(modelisation(line_nodes, ConnectionGeometry::Line.formulation().name()));
    }
    let rigid_links = graph.rigid_link_groups();
    if !rigid_links.is_empty() {
      affe.push(modelisation(rigid_links, Formulation::Beam.name()));
    }
    return Command::bound(MODEL, "AFFE_MODELE", vec![
      Keyword::result("MAILLAGE", MESH),
      Keyword::facts("AFFE", affe)
    ]);
  }

  /// One `DEFI_MATERIAU` per material, then `AFFE_MATERIAU`.
  fn materials(&self) -> Vec<Command> {
    let graph = self.graph;
    let mut commands = Vec::new();
    let mut affe = Vec::new();
    for (i, material) in graph.materials().iter().enumerate() {
      commands.push(Command::bound(material_name(i), "DEFI_MATERIAU", vec![
        Keyword::fact("ELAS", vec![
          Keyword::lit("E", material.young_modulus()),
          Keyword::lit("NU", material.poisson_ratio()),
          Keyword::lit("RHO", material.mass_density())
        ])
      ]));
      affe.push(vec![
        Keyword::tuple("GROUP_MA", graph.material_groups(material)),
        Keyword::result("MATER", material_name(i))
      ]);
    }
    let rigid_links = graph.rigid_link_groups();
    if !rigid_links.is_empty() {
      let index = self.settings.rigid_link_material;
      if index >= graph.materials().len() {
        warn!(
          "Rigid links use material {}, but there are only {} materials.",
          index,
          graph.materials().len()
        );
      }
      affe.push(vec![
        Keyword::tuple("GROUP_MA", rigid_links),
        Keyword::result("MATER", material_name(index))
      ]);
    }
    commands.push(Command::bound(MATERIAL, "AFFE_MATERIAU", vec![
      Keyword::result("MAILLAGE", MESH),
      Keyword::facts("AFFE", affe)
    ]));
    return commands;
  }

  /// `AFFE_CARA_ELEM`: beam sections, shell thicknesses, discrete
  /// stiffnesses and local frames.
  fn element_characteristics(&self) -> Command {
    return Command::bound(ELEMENT, "AFFE_CARA_ELEM", vec![
      Keyword::result("MODELE", MODEL),
      Keyword::facts("POUTRE", self.beams()),
      Keyword::facts("COQUE", self.shells()),
      Keyword::facts("DISCRET", self.discretes()),
      Keyword::facts("ORIENTATION", self.orientations())
    ]);
  }

  /// Beam sections: one per describable profile, plus the rigid links.
  fn beams(&self) -> Vec<Vec<Keyword>> {
    let graph = self.graph;
    let section = |groups: Vec<GroupName>, section: &BeamSection| vec![
      Keyword::tuple("GROUP_MA", groups),
      Keyword::lit("SECTION", section.keyword()),
      Keyword::tuple("CARA", section.characteristics().iter().copied()),
      Keyword::tuple("VALE", section.values())
    ];
    let mut facts = Vec::new();
    for profile in graph.profiles() {
      match profile.section() {
        Some(s) => facts.push(section(graph.profile_groups(profile), &s)),
        None => warn!(
          "Profile {} ({}, {}) has no usable section, skipping it.",
          profile.name.as_deref().unwrap_or("<unnamed>"),
          profile.profile_shape,
          profile.profile_type
        ),
      }
    }
    let rigid_links = graph.rigid_link_groups();
    if !rigid_links.is_empty() {
      let [hy, hz] = self.settings.rigid_link_section;
      facts.push(section(rigid_links, &BeamSection::Rectangle { hy, hz }));
    }
    return facts;
  }

  /// Shell thickness and local X, per surface element.
  fn shells(&self) -> Vec<Vec<Keyword>> {
    return self.graph.elements_of(ElementGeometry::Surface)
      .map(|el| {
        let x = el.orientation.local_axis(Axis::X);
        return vec![
          Keyword::lit("GROUP_MA", &el.group),
          Keyword::lit("EPAIS", el.thickness.unwrap_or_default()),
          Keyword::tuple("VECTEUR", x.iter().copied())
        ];
      })
      .collect();
  }

  /// Node stiffnesses of point and line connections, with the relation
  /// springs of point connections right after their node.
  fn discretes(&self) -> Vec<Vec<Keyword>> {
    let mut facts = Vec::new();
    for conn in self.graph.connections_of(ConnectionGeometry::Point) {
      facts.push(discrete(&conn.node_group, "K_TR_D_N", &conn.restraint.stiffnesses));
      for rel in conn.relations.iter() {
        if let Some(spring) = &rel.spring_group {
          facts.push(discrete(spring, "K_TR_D_L", &rel.constraints.stiffnesses));
        }
      }
    }
    for conn in self.graph.connections_of(ConnectionGeometry::Line) {
      facts.push(discrete(&conn.node_group, "K_TR_D_N", &conn.restraint.stiffnesses));
    }
    return facts;
  }

  /// Local Y of line elements; local X and Y of connection nodes and
  /// relation springs.
  fn orientations(&self) -> Vec<Vec<Keyword>> {
    let graph = self.graph;
    let mut facts = Vec::new();
    for el in graph.elements_of(ElementGeometry::Line) {
      let y = el.orientation.local_axis(Axis::Y);
      facts.push(orientation(&el.group, "VECT_Y", y.iter().copied()));
    }
    for conn in graph.connections_of(ConnectionGeometry::Point) {
      facts.push(orientation(&conn.node_group, "VECT_X_Y", conn.orientation.local_xy()));
      for rel in conn.relations.iter() {
        if let Some(spring) = &rel.spring_group {
          facts.push(orientation(spring, "VECT_X_Y", rel.orientation.local_xy()));
        }
      }
    }
    for conn in graph.connections_of(ConnectionGeometry::Line) {
      facts.push(orientation(&conn.node_group, "VECT_X_Y", conn.orientation.local_xy()));
    }
    return facts;
  }

  /// Supports and constraints. Point connections tie DOFs node by node,
  /// line connections tie groups; surface connections aren't tied.
  fn liaisons(&self) -> Command {
    let graph = self.graph;
    let equations = |conn: &'a Connection| conn.restraint.equations.iter()
      .chain(conn.relations.iter().flat_map(|r| r.constraints.equations.iter()));
    let ddl = graph.connections_of(ConnectionGeometry::Point)
      .flat_map(equations)
      .map(liaison_ddl)
      .collect();
    let group = graph.connections_of(ConnectionGeometry::Line)
      .flat_map(equations)
      .map(liaison_group)
      .collect();
    let surfaces = graph.connections_of(ConnectionGeometry::Surface).count();
    if surfaces > 0 {
      warn!("{} surface connections won't be tied to anything.", surfaces);
    }
    let mut keywords = vec![
      Keyword::result("MODELE", MODEL),
      Keyword::facts("LIAISON_DDL", ddl),
      Keyword::facts("LIAISON_GROUP", group)
    ];
    if graph.has_unified_connection() {
      let unif = graph.unified_connections()
        .map(|conn| vec![
          Keyword::tuple("GROUP_NO", conn.unified.names.iter()),
          Keyword::tuple("DDL", Dof::all().iter().copied())
        ])
        .collect();
      keywords.push(Keyword::facts("LIAISON_UNIF", unif));
    }
    let rigid_links = graph.rigid_link_groups();
    if !rigid_links.is_empty() {
      let solide = rigid_links.iter()
        .map(|g| vec![Keyword::lit("GROUP_MA", g)])
        .collect();
      keywords.push(Keyword::facts("LIAISON_SOLIDE", solide));
    }
    return Command::bound(LIAISONS, "AFFE_CHAR_MECA", keywords);
  }

  /// Self-weight.
  fn gravity(&self) -> Command {
    return Command::bound(GRAVITY_LOAD, "AFFE_CHAR_MECA", vec![
      Keyword::result("MODELE", MODEL),
      Keyword::fact("PESANTEUR", vec![
        Keyword::lit("GRAVITE", self.settings.gravity),
        Keyword::tuple("DIRECTION", self.settings.gravity_direction)
      ])
    ]);
  }
}
