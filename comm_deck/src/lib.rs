//! This library writes Code_Aster command files for models compiled with
//! `camodel`: a linear-static analysis under self-weight, with every group,
//! tie and spring the model defines.
//!
//! Command files are Python scripts, so the [`formatting`] module writes
//! values the way Python would, and [`command`] gives every statement the
//! same shape.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::needless_return)]

pub mod command;
pub mod formatting;
pub mod layout;
pub mod settings;

use camodel::graph::ConnectionGraph;

use crate::layout::CommandFile;
use crate::settings::DeckSettings;

/// Utility function -- lays out and renders a command file in one go.
pub fn render_deck(graph: &ConnectionGraph, settings: &DeckSettings) -> String {
  return CommandFile::assemble(graph, settings).render();
}

/// Imports the most relevant exports from the library.
pub mod prelude {
  pub use super::command::*;
  pub use super::formatting::*;
  pub use super::layout::*;
  pub use super::settings::*;
  pub use super::render_deck;
}

#[cfg(test)]
mod tests;
