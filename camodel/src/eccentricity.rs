//! This module resolves eccentric relations: members attaching to a
//! connection away from its analytical node.
//!
//! Each eccentric relation gets its own attachment group on the connection
//! side and a rigid link from the member to the connection. When several
//! members attach eccentrically at the same connection, their attachment
//! groups and the connection's own group are tied together so they move as
//! one rigid body.
//!
//! Indices are only unique within a connection.

use serde::{Deserialize, Serialize};

use crate::naming::*;

/// The extra groups an eccentric relation gets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EccentricLink {
  /// 1-based index within the connection: how many relations were already
  /// attached, plus one.
  pub index: usize,
  /// The attachment's group within the connection's unified set.
  pub unified_group: GroupName,
  /// The rigid link from the member to the connection.
  pub rigid_link_group: GroupName
}

impl EccentricLink {
  /// Builds the link for a relation, given how many relations the connection
  /// had before it.
  pub fn new(
    element: &GroupName,
    connection: &GroupName,
    prior_relations: usize
  ) -> Self {
    let index = prior_relations + 1;
    return Self {
      index,
      unified_group: connection.suffixed(format!("{}{}", ECCENTRIC_TAG, index)),
      rigid_link_group: element.joined(RIGID_LINK_TAG, connection)
    };
  }
}

/// The group a relation is coupled to on the connection side: a dedicated
/// attachment group if eccentric, the connection's own group otherwise.
pub fn secondary_group(
  element: &GroupName,
  connection: &GroupName,
  eccentric: bool
) -> GroupName {
  if eccentric {
    return connection.joined(ECCENTRIC_TAG, element);
  }
  return connection.clone();
}

/// The groups tied together at a connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedGroups {
  /// With at least two eccentric relations: the connection's own group
  /// followed by each attachment group. Otherwise just the attachment groups
  /// there are (one or none).
  pub names: Vec<GroupName>,
  /// Whether the connection ties its groups together.
  pub unified: bool
}

impl UnifiedGroups {
  /// Collects the attachment groups of a connection, in attachment order.
  pub fn collect<'a, I>(base: &GroupName, attachments: I) -> Self
    where I: IntoIterator<Item = &'a GroupName> {
    let mut names: Vec<GroupName> = attachments.into_iter().cloned().collect();
    if names.len() < 2 {
      return Self { names, unified: false };
    }
    names.insert(0, base.clone());
    return Self { names, unified: true };
  }
}
