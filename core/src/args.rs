//! Call arguments: the per-invocation name → value map.
//!
//! # Design
//! Arguments serve two jobs on every call: filling path placeholders and
//! building the JSON payload. `ParamValue` is an explicit value enum
//! rather than `serde_json::Value` for two reasons:
//!
//! - `Display` renders values the way a path segment needs them (strings
//!   unquoted), which `Value` cannot do without special-casing.
//! - JSON encoding of a payload must be able to fail so the router's
//!   degraded-send path is real. `serde_json::Value` cannot even hold a
//!   non-finite float; `ParamValue::Float` can, and serializing one is an
//!   error here instead of the silent `null` serde_json would emit.
//!
//! `CallArguments` is a `BTreeMap` so iteration order (and therefore
//! payload key order and log output) is deterministic.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Mapping from parameter name to value, supplied by the caller per
/// invocation.
pub type CallArguments = BTreeMap<String, ParamValue>;

/// A single argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    /// True for the explicit JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Null => serializer.serialize_unit(),
            ParamValue::Bool(b) => serializer.serialize_bool(*b),
            ParamValue::Int(i) => serializer.serialize_i64(*i),
            ParamValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            ParamValue::Float(f) => Err(S::Error::custom(format!(
                "non-finite float {f} is not representable in JSON"
            ))),
            ParamValue::Str(s) => serializer.serialize_str(s),
            ParamValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ParamValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Renders a value for interpolation into a path segment. Strings come
/// out bare; containers fall back to their debug form since they have no
/// sensible path representation.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => f.write_str("null"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Str(s) => f.write_str(s),
            other => write!(f, "{other:?}"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        ParamValue::Int(i64::from(i))
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<u64> for ParamValue {
    fn from(u: u64) -> Self {
        // Ids beyond i64::MAX do not occur in practice; degrade to float
        // rather than wrap.
        i64::try_from(u).map_or(ParamValue::Float(u as f64), ParamValue::Int)
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Float(x)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(items: Vec<ParamValue>) -> Self {
        ParamValue::List(items)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map(ParamValue::Int)
                .or_else(|| n.as_f64().map(ParamValue::Float))
                .unwrap_or(ParamValue::Null),
            Value::String(s) => ParamValue::Str(s),
            Value::Array(items) => {
                ParamValue::List(items.into_iter().map(ParamValue::from).collect())
            }
            Value::Object(entries) => ParamValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, ParamValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Lowers a typed input into the argument map an operation dispatches
/// with. Implemented by the per-entity create/update types; this is where
/// tri-state fields decide whether they appear at all.
pub trait IntoArguments {
    fn into_arguments(self) -> CallArguments;
}
