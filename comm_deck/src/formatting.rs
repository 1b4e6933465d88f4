//! This module implements Python literals, since command files are Python
//! scripts and every value in them is written the way Python's `repr` would.

use std::fmt::{Display, Write};

use camodel::prelude::*;
use itertools::Itertools;

/// Writes an f64 the way Python's `repr` does: shortest round-trip digits,
/// always with a decimal point or an exponent, switching to scientific
/// notation below 1e-4 and from 1e16 on.
pub fn fmt_real<W: Write>(f: &mut W, x: f64) -> std::fmt::Result {
  if x.is_nan() {
    return write!(f, "nan");
  }
  if x.is_infinite() {
    return write!(f, "{}", if x > 0.0 { "inf" } else { "-inf" });
  }
  let sci = format!("{:e}", x);
  let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
  let exponent: i32 = exponent.parse().unwrap_or(0);
  if !(-4..16).contains(&exponent) {
    let sign = if exponent < 0 { '-' } else { '+' };
    return write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs());
  }
  let plain = x.to_string();
  if plain.contains('.') {
    return write!(f, "{}", plain);
  }
  return write!(f, "{}.0", plain);
}

/// Writes a string the way Python's `repr` does.
pub fn fmt_str<W: Write>(f: &mut W, s: &str) -> std::fmt::Result {
  let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
  f.write_char(quote)?;
  for c in s.chars() {
    match c {
      '\\' => f.write_str("\\\\")?,
      '\n' => f.write_str("\\n")?,
      '\r' => f.write_str("\\r")?,
      '\t' => f.write_str("\\t")?,
      c if c == quote => write!(f, "\\{}", c)?,
      c => f.write_char(c)?
    }
  }
  return f.write_char(quote);
}

/// A Python value as it appears in a command file.
#[derive(Clone, Debug, PartialEq, derive_more::From)]
pub enum PyLiteral {
  /// A float.
  Real(f64),
  /// An integer.
  Integer(i64),
  /// A string.
  Str(String),
  /// A group name, written as a string.
  Group(GroupName),
  /// A tuple.
  Tuple(Vec<PyLiteral>)
}

impl From<&str> for PyLiteral {
  fn from(value: &str) -> Self {
    return Self::Str(value.to_owned());
  }
}

impl From<&GroupName> for PyLiteral {
  fn from(value: &GroupName) -> Self {
    return Self::Group(value.clone());
  }
}

impl From<usize> for PyLiteral {
  fn from(value: usize) -> Self {
    return Self::Integer(value as i64);
  }
}

impl From<Dof> for PyLiteral {
  fn from(value: Dof) -> Self {
    return Self::from(value.solver_name());
  }
}

impl Display for PyLiteral {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::Real(x) => fmt_real(f, *x),
      Self::Integer(i) => i.fmt(f),
      Self::Str(s) => fmt_str(f, s),
      Self::Group(g) => fmt_str(f, g.as_str()),
      Self::Tuple(items) if items.len() == 1 => write!(f, "({},)", items[0]),
      Self::Tuple(items) => write!(f, "({})", items.iter().join(", ")),
    };
  }
}

impl PyLiteral {
  /// Makes a tuple out of anything convertible.
  pub fn tuple<I, T>(items: I) -> Self
    where I: IntoIterator<Item = T>, T: Into<PyLiteral> {
    return Self::Tuple(items.into_iter().map(Into::into).collect());
  }
}
