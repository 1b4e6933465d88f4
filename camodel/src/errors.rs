//! Contains the error type for loading and compiling models.

use std::error::Error;
use std::fmt::Display;
use std::io;

use crate::naming::QualifiedName;

/// Everything that can abort loading or compiling a model. There is no
/// partial result: any of these means nothing gets written.
#[derive(Debug)]
pub enum ModelError {
  /// A relation points at a connection that isn't in the model.
  UnknownConnection {
    /// The element declaring the relation.
    element: QualifiedName,
    /// The connection name that couldn't be found.
    connection: QualifiedName
  },
  /// A surface member has no thickness.
  MissingThickness(QualifiedName),
  /// The input couldn't be read.
  Io(io::Error),
  /// The input isn't a valid model.
  Json(serde_json::Error)
}

impl Display for ModelError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::UnknownConnection { element, connection } => write!(
        f,
        "element {} is related to connection {}, which does not exist",
        element,
        connection
      ),
      Self::MissingThickness(name) => write!(
        f,
        "surface element {} has no thickness",
        name
      ),
      Self::Io(e) => write!(f, "could not read model: {}", e),
      Self::Json(e) => write!(f, "invalid model: {}", e),
    };
  }
}

impl Error for ModelError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    return match self {
      Self::Io(e) => Some(e),
      Self::Json(e) => Some(e),
      _ => None
    };
  }
}

impl From<io::Error> for ModelError {
  fn from(value: io::Error) -> Self {
    return Self::Io(value);
  }
}

impl From<serde_json::Error> for ModelError {
  fn from(value: serde_json::Error) -> Self {
    return Self::Json(value);
  }
}
