//! This module implements utility functions without much need for defining
//! context or not enough of it to warrant them having their own modules.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Loose truthiness for JSON values, the way the exporters producing our
/// input write flags: null, false, zero and empty things are false.
pub(crate) fn is_truthy(value: &Value) -> bool {
  return match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(a) => !a.is_empty(),
    Value::Object(o) => !o.is_empty(),
  };
}

/// Deserializes any JSON value into a flag using [`is_truthy`].
pub(crate) fn deserialize_truthy<'de, D>(de: D) -> Result<bool, D::Error>
  where D: Deserializer<'de> {
  let raw: Option<Value> = Option::deserialize(de)?;
  return Ok(raw.as_ref().is_some_and(is_truthy));
}
