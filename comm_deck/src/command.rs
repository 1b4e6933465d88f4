//! This module implements the shape of a command-file statement: an
//! operator called with keyword arguments, optionally bound to a result name.
//!
//! Factor keywords (`_F(...)`) nest; everything else is a Python literal or
//! a reference to an earlier result.

use std::fmt::{Display, Write};

use crate::formatting::PyLiteral;

/// Indentation per nesting level.
const INDENT: &str = "    ";

/// Writes `depth` levels of indentation.
fn indent<W: Write>(f: &mut W, depth: usize) -> std::fmt::Result {
  for _ in 0..depth {
    f.write_str(INDENT)?;
  }
  return Ok(());
}

/// The value of a keyword argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
  /// A literal value.
  Literal(PyLiteral),
  /// The name of an earlier result, written bare.
  Result(String),
  /// A single factor keyword.
  Fact(Vec<Keyword>),
  /// A tuple of factor keywords.
  Facts(Vec<Vec<Keyword>>)
}

/// A keyword argument.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyword {
  /// The keyword, like `GROUP_MA`.
  pub key: &'static str,
  /// Its value.
  pub arg: Arg
}

impl Keyword {
  /// A keyword with a literal value.
  pub fn lit<T: Into<PyLiteral>>(key: &'static str, value: T) -> Self {
    return Self { key, arg: Arg::Literal(value.into()) };
  }

  /// A keyword with a tuple value.
  pub fn tuple<I, T>(key: &'static str, items: I) -> Self
    where I: IntoIterator<Item = T>, T: Into<PyLiteral> {
    return Self { key, arg: Arg::Literal(PyLiteral::tuple(items)) };
  }

  /// A keyword referring to an earlier result.
  pub fn result<S: Into<String>>(key: &'static str, name: S) -> Self {
    return Self { key, arg: Arg::Result(name.into()) };
  }

  /// A keyword with a single factor.
  pub fn fact(key: &'static str, keywords: Vec<Keyword>) -> Self {
    return Self { key, arg: Arg::Fact(keywords) };
  }

  /// A keyword with a tuple of factors. May be empty.
  pub fn facts(key: &'static str, facts: Vec<Vec<Keyword>>) -> Self {
    return Self { key, arg: Arg::Facts(facts) };
  }

  /// Writes this keyword at a given depth, without a trailing separator.
  fn write_at<W: Write>(&self, f: &mut W, depth: usize) -> std::fmt::Result {
    indent(f, depth)?;
    write!(f, "{} = ", self.key)?;
    return match &self.arg {
      Arg::Literal(lit) => write!(f, "{}", lit),
      Arg::Result(name) => f.write_str(name),
      Arg::Fact(keywords) => {
        f.write_str("_F(\n")?;
        write_keywords(f, keywords, depth + 1)?;
        indent(f, depth)?;
        f.write_char(')')
      },
      Arg::Facts(facts) => {
        f.write_str("(\n")?;
        for keywords in facts {
          indent(f, depth + 1)?;
          f.write_str("_F(\n")?;
          write_keywords(f, keywords, depth + 2)?;
          indent(f, depth + 1)?;
          f.write_str("),\n")?;
        }
        indent(f, depth)?;
        f.write_char(')')
      }
    };
  }
}

/// Writes keywords one per line, comma-separated.
fn write_keywords<W: Write>(
  f: &mut W,
  keywords: &[Keyword],
  depth: usize
) -> std::fmt::Result {
  for (i, kw) in keywords.iter().enumerate() {
    kw.write_at(f, depth)?;
    if i + 1 < keywords.len() {
      f.write_char(',')?;
    }
    f.write_char('\n')?;
  }
  return Ok(());
}

/// A statement in a command file.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
  /// Name the result is bound to, if kept.
  pub result: Option<String>,
  /// The operator, like `AFFE_MODELE`.
  pub operator: &'static str,
  /// The keyword arguments, in order.
  pub keywords: Vec<Keyword>
}

impl Command {
  /// A command whose result is discarded.
  pub fn new(operator: &'static str, keywords: Vec<Keyword>) -> Self {
    return Self { result: None, operator, keywords };
  }

  /// A command whose result is bound to a name.
  pub fn bound<S: Into<String>>(
    result: S,
    operator: &'static str,
    keywords: Vec<Keyword>
  ) -> Self {
    return Self { result: Some(result.into()), operator, keywords };
  }

  /// Finds a top-level keyword.
  pub fn keyword(&self, key: &str) -> Option<&Keyword> {
    return self.keywords.iter().find(|k| k.key == key);
  }
}

impl Display for Command {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if let Some(name) = &self.result {
      write!(f, "{} = ", name)?;
    }
    if self.keywords.is_empty() {
      return write!(f, "{}()", self.operator);
    }
    writeln!(f, "{}(", self.operator)?;
    write_keywords(f, &self.keywords, 1)?;
    return f.write_char(')');
  }
}
