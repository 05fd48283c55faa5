//! Raw parameter values as written in configuration documents
//!
//! ```text
//! raw-value := scalar
//!            | sequence<raw-value>
//!            | { <resolver-name> : raw-value }
//! ```
//!
//! Mappings are kept as parsed; whether one is a valid resolver call is only
//! decided at resolution time.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_yaml::Value;

/// Parameter name to raw value, as found under `parameters:`.
pub type RawParams = BTreeMap<String, RawValue>;

/// A scalar leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_yaml::Number),
    String(String),
}

/// Renders `true`, `123`, `1.05`. Whole floats drop the fraction (`1.0` is
/// `1`) and `Null` renders as the empty string.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => match n.as_f64() {
                Some(x) if n.is_f64() => write_float(f, x),
                _ => write!(f, "{n}"),
            },
            Self::String(s) => f.write_str(s),
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        f.write_str("NaN")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "+Inf" } else { "-Inf" })
    } else {
        write!(f, "{x}")
    }
}

/// A parameter value before resolution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_yaml::Value")]
pub enum RawValue {
    Scalar(Scalar),
    Sequence(Vec<RawValue>),
    Mapping(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// Build a resolver call `{ name: inner }`.
    pub fn call(name: impl Into<String>, inner: impl Into<RawValue>) -> Self {
        Self::Mapping(BTreeMap::from([(name.into(), inner.into())]))
    }

    /// The resolver name and input if this is a single-entry mapping.
    pub fn as_resolver_call(&self) -> Option<(&str, &RawValue)> {
        match self {
            Self::Mapping(map) if map.len() == 1 => {
                map.iter().next().map(|(name, inner)| (name.as_str(), inner))
            }
            _ => None,
        }
    }

    /// The rendered text of a scalar, `None` for sequences and mappings.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Scalar(scalar) => Some(scalar.to_string()),
            _ => None,
        }
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            Value::String(s) => Self::Scalar(Scalar::String(s)),
            Value::Sequence(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .map(|(k, v)| (mapping_key(k), Self::from(v)))
                    .collect(),
            ),
            // Tags carry no meaning for parameter values.
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

fn mapping_key(key: Value) -> String {
    match RawValue::from(key) {
        RawValue::Scalar(scalar) => scalar.to_string(),
        other => format!("{other:?}"),
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::String(s))
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Number(n.into()))
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Scalar(Scalar::Number(n.into()))
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}
