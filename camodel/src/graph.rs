//! This module implements the connection graph: elements, connections and
//! the relations joining them, compiled in one pass from input records.
//!
//! The graph owns everything. Relations live in the connection they attach
//! to, in attachment order; elements refer back to them by index.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::conditions::AppliedCondition;
use crate::constraints::*;
use crate::dimensionality::*;
use crate::eccentricity::*;
use crate::errors::ModelError;
use crate::geometry::Orientation;
use crate::naming::*;
use crate::properties::*;
use crate::records::*;

/// Where a relation lives: which connection, and which slot within it.
#[derive(
  Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord
)]
pub struct RelationRef {
  /// Index of the connection in the graph.
  pub connection: usize,
  /// Index of the relation within the connection.
  pub slot: usize
}

/// A compiled element-to-connection relation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Relation {
  /// The element.
  pub element: QualifiedName,
  /// The connection.
  pub connection: QualifiedName,
  /// The conditions in effect, after defaulting.
  pub applied_condition: AppliedCondition,
  /// Whether the conditions were declared or defaulted.
  pub declared: bool,
  /// Whether the element attaches eccentrically.
  pub eccentric: bool,
  /// Local frame used to derive the equations.
  pub orientation: Orientation,
  /// Group on the element side.
  pub primary_group: GroupName,
  /// Group on the connection side.
  pub secondary_group: GroupName,
  /// Spring group, for relations at point connections.
  pub spring_group: Option<GroupName>,
  /// Extra groups, for eccentric relations.
  pub link: Option<EccentricLink>,
  /// Equations and stiffnesses.
  pub constraints: CompiledConstraints
}

impl Relation {
  /// Compiles a relation record against the connection it attaches to.
  /// `owner` is the element the record was listed under.
  fn compile(
    record: &RelationRecord,
    owner: &QualifiedName,
    connection: &Connection
  ) -> Self {
    let element = record.relating_element.clone().unwrap_or_else(|| owner.clone());
    let element_group = group_name(&element);
    let connection_group = &connection.group;
    let geometry = connection.geometry;
    let primary_group = element_group.joined(
      geometry.relation_tag(),
      connection_group
    );
    let spring_group = if geometry.has_relation_springs() {
      Some(element_group.joined(SPRING_TAG, connection_group))
    } else {
      None
    };
    let secondary_group = secondary_group(
      &element_group,
      connection_group,
      record.eccentricity
    );
    let link = if record.eccentricity {
      Some(EccentricLink::new(
        &element_group,
        connection_group,
        connection.relations.len()
      ))
    } else {
      None
    };
    let orientation = record.orientation.unwrap_or(connection.orientation);
    let constraints = resolve_relation(
      &primary_group,
      &secondary_group,
      &orientation,
      record.applied_condition.as_ref()
    );
    debug!(
      "Relation {} -> {} compiled to {} equations{}.",
      primary_group,
      secondary_group,
      constraints.equations.len(),
      if record.eccentricity { " (eccentric)" } else { "" }
    );
    return Self {
      element,
      connection: connection.name.clone(),
      applied_condition: record.applied_condition
        .unwrap_or(AppliedCondition::fully_fixed()),
      declared: record.applied_condition.is_some(),
      eccentric: record.eccentricity,
      orientation,
      primary_group,
      secondary_group,
      spring_group,
      link,
      constraints
    };
  }

  /// The rigid-link group, if eccentric.
  pub fn rigid_link_group(&self) -> Option<&GroupName> {
    return self.link.as_ref().map(|l| &l.rigid_link_group);
  }

  /// The attachment group in the connection's unified set, if eccentric.
  pub fn unified_group(&self) -> Option<&GroupName> {
    return self.link.as_ref().map(|l| &l.unified_group);
  }
}

/// A compiled connection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Connection {
  /// Qualified name.
  pub name: QualifiedName,
  /// Base group.
  pub group: GroupName,
  /// Group of the connection's discrete node.
  pub node_group: GroupName,
  /// Dimensionality.
  pub geometry: ConnectionGeometry,
  /// Local frame.
  pub orientation: Orientation,
  /// Declared ground condition, if any.
  pub applied_condition: Option<AppliedCondition>,
  /// The ground condition, compiled.
  pub restraint: CompiledConstraints,
  /// Relations attaching here, in attachment order.
  pub relations: Vec<Relation>,
  /// Groups tied together here.
  pub unified: UnifiedGroups
}

impl Connection {
  /// Creates a connection with no relations and compiles its ground
  /// restraint, which doesn't depend on any element.
  fn new(record: &ConnectionRecord) -> Self {
    let group = group_name(&record.ifc_name);
    let restraint = resolve_restraint(
      &group,
      &record.orientation,
      record.applied_condition.as_ref()
    );
    debug!(
      "Connection {} ({}) restrained by {} equations.",
      group,
      record.geometry_type,
      restraint.equations.len()
    );
    return Self {
      name: record.ifc_name.clone(),
      node_group: node_group_name(&record.ifc_name),
      group,
      geometry: record.geometry_type,
      orientation: record.orientation,
      applied_condition: record.applied_condition,
      restraint,
      relations: Vec::new(),
      unified: UnifiedGroups::default()
    };
  }

  /// Whether the connection is tied to the ground at all.
  pub fn is_restrained(&self) -> bool {
    return self.applied_condition.is_some();
  }

  /// Whether the connection ties several eccentric attachments together.
  pub fn is_unified(&self) -> bool {
    return self.unified.unified;
  }

  /// The eccentric relations attaching here.
  pub fn eccentric_relations(&self) -> impl Iterator<Item = &Relation> {
    return self.relations.iter().filter(|r| r.eccentric);
  }

  /// Collects the unified groups once every relation is attached.
  fn finalise(&mut self) {
    let attachments = self.relations.iter().filter_map(|r| r.unified_group());
    self.unified = UnifiedGroups::collect(&self.group, attachments);
    if self.unified.unified {
      debug!(
        "Connection {} ties {} groups together.",
        self.group,
        self.unified.names.len()
      );
    }
  }
}

/// A compiled element.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Element {
  /// Qualified name.
  pub name: QualifiedName,
  /// Group.
  pub group: GroupName,
  /// Dimensionality.
  pub geometry: ElementGeometry,
  /// Local frame.
  pub orientation: Orientation,
  /// Thickness, for surfaces.
  pub thickness: Option<f64>,
  /// Where this element's relations live, in declaration order.
  pub relations: Vec<RelationRef>
}

/// The compiled model.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConnectionGraph {
  /// Elements, in input order.
  elements: Vec<Element>,
  /// Connections, in input order.
  connections: Vec<Connection>,
  /// Materials, in input order.
  materials: Vec<MaterialRecord>,
  /// Profiles, in input order.
  profiles: Vec<ProfileRecord>
}

impl ConnectionGraph {
  /// Builds and compiles the graph. Fails on the first relation pointing at
  /// a connection that doesn't exist.
  pub fn load(records: ModelRecords) -> Result<Self, ModelError> {
    let ModelRecords { elements: element_records, connections, db } = records;
    // connections first; ground restraints don't need elements.
    let mut lookup: BTreeMap<QualifiedName, usize> = BTreeMap::new();
    let mut graph = Self {
      elements: Vec::with_capacity(element_records.len()),
      connections: Vec::with_capacity(connections.len()),
      materials: db.materials,
      profiles: db.profiles
    };
    for (i, record) in connections.iter().enumerate() {
      if lookup.contains_key(&record.ifc_name) {
        warn!(
          "Connection {} is declared more than once; the first one wins.",
          record.ifc_name
        );
      } else {
        lookup.insert(record.ifc_name.clone(), i);
      }
      graph.connections.push(Connection::new(record));
    }
    // now the elements, attaching their relations as we go.
    for record in element_records.iter() {
      if record.geometry_type == ElementGeometry::Surface
        && record.thickness.is_none() {
        return Err(ModelError::MissingThickness(record.ifc_name.clone()));
      }
      let mut relations = Vec::with_capacity(record.connections.len());
      for rel in record.connections.iter() {
        let ci = *lookup.get(&rel.related_connection).ok_or_else(|| {
          ModelError::UnknownConnection {
            element: record.ifc_name.clone(),
            connection: rel.related_connection.clone()
          }
        })?;
        let connection = &mut graph.connections[ci];
        let compiled = Relation::compile(rel, &record.ifc_name, connection);
        relations.push(RelationRef {
          connection: ci,
          slot: connection.relations.len()
        });
        connection.relations.push(compiled);
      }
      graph.elements.push(Element {
        name: record.ifc_name.clone(),
        group: group_name(&record.ifc_name),
        geometry: record.geometry_type,
        orientation: record.orientation,
        thickness: record.thickness,
        relations
      });
    }
    for connection in graph.connections.iter_mut() {
      connection.finalise();
    }
    info!(
      "Compiled {} elements, {} connections and {} relations.",
      graph.elements.len(),
      graph.connections.len(),
      graph.relations().count()
    );
    return Ok(graph);
  }

  /// Parses and compiles a JSON model.
  pub fn from_json_str(s: &str) -> Result<Self, ModelError> {
    return Self::load(ModelRecords::from_json_str(s)?);
  }

  /// Utility method -- reads, parses and compiles a JSON model file.
  pub fn from_file<P: AsRef<Path>>(p: P) -> Result<Self, ModelError> {
    return Self::load(ModelRecords::from_file(p)?);
  }

  /// All elements, in input order.
  pub fn elements(&self) -> &[Element] {
    return &self.elements;
  }

  /// All connections, in input order.
  pub fn connections(&self) -> &[Connection] {
    return &self.connections;
  }

  /// All materials, in input order.
  pub fn materials(&self) -> &[MaterialRecord] {
    return &self.materials;
  }

  /// All profiles, in input order.
  pub fn profiles(&self) -> &[ProfileRecord] {
    return &self.profiles;
  }

  /// Finds an element by name.
  pub fn element(&self, name: &QualifiedName) -> Option<&Element> {
    return self.elements.iter().find(|e| &e.name == name);
  }

  /// Finds a connection by name.
  pub fn connection(&self, name: &QualifiedName) -> Option<&Connection> {
    return self.connections.iter().find(|c| &c.name == name);
  }

  /// Resolves a relation reference.
  pub fn relation(&self, rref: RelationRef) -> Option<&Relation> {
    return self.connections.get(rref.connection)
      .and_then(|c| c.relations.get(rref.slot));
  }

  /// An element's relations, in declaration order.
  pub fn relations_of<'a>(
    &'a self,
    element: &'a Element
  ) -> impl Iterator<Item = &'a Relation> + 'a {
    return element.relations.iter().filter_map(|r| self.relation(*r));
  }

  /// Every relation, connection by connection.
  pub fn relations(&self) -> impl Iterator<Item = &Relation> {
    return self.connections.iter().flat_map(|c| c.relations.iter());
  }

  /// Elements of a given dimensionality.
  pub fn elements_of(
    &self,
    geometry: ElementGeometry
  ) -> impl Iterator<Item = &Element> {
    return self.elements.iter().filter(move |e| e.geometry == geometry);
  }

  /// Connections of a given dimensionality.
  pub fn connections_of(
    &self,
    geometry: ConnectionGeometry
  ) -> impl Iterator<Item = &Connection> {
    return self.connections.iter().filter(move |c| c.geometry == geometry);
  }

  /// Groups of the elements of a given dimensionality.
  pub fn element_groups(&self, geometry: ElementGeometry) -> Vec<GroupName> {
    return self.elements_of(geometry).map(|e| e.group.clone()).collect();
  }

  /// Node groups of the connections of a given dimensionality.
  pub fn node_groups(&self, geometry: ConnectionGeometry) -> Vec<GroupName> {
    return self.connections_of(geometry)
      .map(|c| c.node_group.clone())
      .collect();
  }

  /// Spring groups, element by element.
  pub fn spring_groups(&self) -> Vec<GroupName> {
    return self.elements.iter()
      .flat_map(|e| self.relations_of(e))
      .filter_map(|r| r.spring_group.clone())
      .collect();
  }

  /// Rigid-link groups, connection by connection.
  pub fn rigid_link_groups(&self) -> Vec<GroupName> {
    return self.relations()
      .filter_map(|r| r.rigid_link_group().cloned())
      .collect();
  }

  /// Connections that tie several eccentric attachments together.
  pub fn unified_connections(&self) -> impl Iterator<Item = &Connection> {
    return self.connections.iter().filter(|c| c.is_unified());
  }

  /// Whether any connection ties attachments together.
  pub fn has_unified_connection(&self) -> bool {
    return self.unified_connections().next().is_some();
  }

  /// Groups of the elements made of a material.
  pub fn material_groups(&self, material: &MaterialRecord) -> Vec<GroupName> {
    return material.related_elements.iter().map(group_name).collect();
  }

  /// Groups of the elements using a profile.
  pub fn profile_groups(&self, profile: &ProfileRecord) -> Vec<GroupName> {
    return profile.related_elements.iter().map(group_name).collect();
  }
}
