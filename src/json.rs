//! JSON value helpers
//!
//! Type classification and the coercions shared by the census walker and
//! the aggregators. Nothing here mutates the document.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Marker appended to truncated renderings
const ELLIPSIS: &str = "...";

/// Category label used when a looked-up field is absent from a record
pub const MISSING_LABEL: &str = "missing";

/// Semantic type of a single JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Object,
    Array,
    /// Numbers that fit neither integer nor float representation
    Other,
}

impl TypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Bool => "bool",
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Str => "str",
            TypeTag::Object => "object",
            TypeTag::Array => "array",
            TypeTag::Other => "other",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, TypeTag::Object | TypeTag::Array)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a value into its semantic type tag
///
/// Booleans are matched before numbers so they never count as `int`.
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Null => TypeTag::Null,
        Value::Bool(_) => TypeTag::Bool,
        Value::Number(n) if n.is_i64() || n.is_u64() => TypeTag::Int,
        Value::Number(n) if n.is_f64() => TypeTag::Float,
        Value::Number(_) => TypeTag::Other,
        Value::String(_) => TypeTag::Str,
        Value::Object(_) => TypeTag::Object,
        Value::Array(_) => TypeTag::Array,
    }
}

/// Coerce a field to a numeric sample
///
/// Only JSON numbers qualify. Missing fields, nulls, booleans, strings and
/// containers yield `None`.
pub fn as_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// String form of a field for categorical tallies
///
/// Strings are used verbatim, everything else in its compact JSON form.
/// An absent field maps to [`MISSING_LABEL`].
pub fn category_label(value: Option<&Value>) -> String {
    match value {
        None => MISSING_LABEL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Truncate a string to at most `max_len` characters
///
/// Longer input keeps `max_len - 3` characters followed by `...`. Limits
/// too small to fit the ellipsis cut the text without one.
/// Counts characters, not bytes, so multi-byte text never splits.
pub fn truncate_chars(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len < ELLIPSIS.len() {
        return s.chars().take(max_len).collect();
    }
    let keep = max_len - ELLIPSIS.len();
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Compact JSON rendering of a value, truncated for display
pub fn short_repr(value: &Value, max_len: usize) -> String {
    truncate_chars(&value.to_string(), max_len)
}

/// Top-level shape of a document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    /// Object root with its keys in document order
    Object { keys: Vec<String> },
    /// Array root with its length
    Array { len: usize },
    /// Any scalar root
    Scalar { tag: TypeTag },
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(map) => Shape::Object {
                keys: map.keys().cloned().collect(),
            },
            Value::Array(arr) => Shape::Array { len: arr.len() },
            other => Shape::Scalar {
                tag: classify(other),
            },
        }
    }

    pub fn tag(&self) -> TypeTag {
        match self {
            Shape::Object { .. } => TypeTag::Object,
            Shape::Array { .. } => TypeTag::Array,
            Shape::Scalar { tag } => *tag,
        }
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod json_tests;
