//! This library implements types and functions to read an analytical
//! structural model (members, connections, materials and profiles, as
//! exported from a BIM tool to JSON) and compile it into what a
//! Code_Aster command file needs: solver group names, coupling equations,
//! spring stiffnesses and the groups tied together at eccentric joints.
//!
//! Writing the command file itself is the job of the `comm_deck` crate; this
//! one knows nothing about the deck's text format.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::needless_return)]

pub mod conditions;
pub mod constraints;
pub mod dimensionality;
pub mod eccentricity;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod naming;
pub mod properties;
pub mod records;
pub(crate) mod util;

/// Imports the most relevant exports from the library.
pub mod prelude {
  pub use super::conditions::*;
  pub use super::constraints::*;
  pub use super::dimensionality::*;
  pub use super::eccentricity::*;
  pub use super::errors::*;
  pub use super::geometry::*;
  pub use super::graph::*;
  pub use super::naming::*;
  pub use super::properties::*;
  pub use super::records::*;
}
