//! Arbitrary caller input, as a tagged union.
//!
//! Hosts convert their dynamic values at the boundary (most commonly from
//! `serde_json::Value`); the loop never inspects types at runtime beyond
//! matching on [`InputValue`].

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    /// Named fields, in insertion order.
    Record(Vec<(String, InputValue)>),
    /// Ordered items. Treated as structured, with items as fields.
    List(Vec<InputValue>),
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl InputValue {
    /// Build a record from `(name, value)` pairs.
    pub fn record<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<InputValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        InputValue::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Records and lists.
    pub fn is_structured(&self) -> bool {
        matches!(self, InputValue::Record(_) | InputValue::List(_))
    }

    /// Direct children of a structured value; empty for scalars.
    pub fn children(&self) -> Box<dyn Iterator<Item = &InputValue> + '_> {
        match self {
            InputValue::Record(fields) => Box::new(fields.iter().map(|(_, v)| v)),
            InputValue::List(items) => Box::new(items.iter()),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Compact JSON text; the form compared by novelty estimation.
    pub fn canonical(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Serialize for InputValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            InputValue::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            InputValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            InputValue::Text(s) => serializer.serialize_str(s),
            InputValue::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            InputValue::Number(_) | InputValue::Null => serializer.serialize_unit(),
            InputValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<serde_json::Value> for InputValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Object(map) => {
                InputValue::Record(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            Value::Array(items) => InputValue::List(items.into_iter().map(Into::into).collect()),
            Value::String(s) => InputValue::Text(s),
            Value::Number(n) => InputValue::Number(n.as_f64().unwrap_or(0.0)),
            Value::Bool(b) => InputValue::Bool(b),
            Value::Null => InputValue::Null,
        }
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        InputValue::Text(s.to_string())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        InputValue::Text(s)
    }
}

impl From<f64> for InputValue {
    fn from(n: f64) -> Self {
        InputValue::Number(n)
    }
}

impl From<bool> for InputValue {
    fn from(b: bool) -> Self {
        InputValue::Bool(b)
    }
}

impl<T: Into<InputValue>> From<Vec<T>> for InputValue {
    fn from(items: Vec<T>) -> Self {
        InputValue::List(items.into_iter().map(Into::into).collect())
    }
}
