use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::ObjectId;

/// A structured event payload.
///
/// Mirrors the JSON data model and adds the two typed leaves the normalizer
/// produces. Typed leaves are never re-interpreted.
///
/// # Examples
///
/// ```
/// use gateway_core::PayloadValue;
/// use serde_json::json;
///
/// let value = PayloadValue::from(json!({ "count": 3, "tags": ["a"] }));
/// assert!(value.is_object());
/// assert_eq!(value.get("count"), Some(&PayloadValue::from(json!(3))));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    /// JSON `null`
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number
    Number(Number),
    /// JSON string that was not reinterpreted
    String(String),
    /// Document-store identifier
    ObjectId(ObjectId),
    /// UTC instant
    DateTime(DateTime<Utc>),
    /// Ordered sequence
    Array(Vec<PayloadValue>),
    /// String-keyed mapping; key order is not significant
    Object(BTreeMap<String, PayloadValue>),
}

impl PayloadValue {
    /// Returns `true` for `Object`.
    pub fn is_object(&self) -> bool {
        matches!(self, PayloadValue::Object(_))
    }

    /// Returns the string if this is an untyped string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PayloadValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the identifier if this is an `ObjectId` leaf.
    pub fn as_object_id(&self) -> Option<&ObjectId> {
        match self {
            PayloadValue::ObjectId(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the instant if this is a `DateTime` leaf.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            PayloadValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns the elements if this is an `Array`.
    pub fn as_array(&self) -> Option<&Vec<PayloadValue>> {
        match self {
            PayloadValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up `key` if this is an `Object`.
    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        match self {
            PayloadValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Converts back to plain JSON, spelling typed leaves the way they serialize.
    pub fn to_json(&self) -> Value {
        match self {
            PayloadValue::Null => Value::Null,
            PayloadValue::Bool(b) => Value::Bool(*b),
            PayloadValue::Number(n) => Value::Number(n.clone()),
            PayloadValue::String(s) => Value::String(s.clone()),
            PayloadValue::ObjectId(id) => Value::String(id.to_hex()),
            PayloadValue::DateTime(dt) => Value::String(format_datetime(dt)),
            PayloadValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            PayloadValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Millisecond RFC 3339 with a `Z` suffix, the shape JSON encoders emit for dates.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<Value> for PayloadValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => PayloadValue::Null,
            Value::Bool(b) => PayloadValue::Bool(b),
            Value::Number(n) => PayloadValue::Number(n),
            Value::String(s) => PayloadValue::String(s),
            Value::Array(items) => {
                PayloadValue::Array(items.into_iter().map(PayloadValue::from).collect())
            }
            Value::Object(map) => PayloadValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, PayloadValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(s: &str) -> Self {
        PayloadValue::String(s.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(s: String) -> Self {
        PayloadValue::String(s)
    }
}

impl From<ObjectId> for PayloadValue {
    fn from(id: ObjectId) -> Self {
        PayloadValue::ObjectId(id)
    }
}

impl From<DateTime<Utc>> for PayloadValue {
    fn from(dt: DateTime<Utc>) -> Self {
        PayloadValue::DateTime(dt)
    }
}

impl Serialize for PayloadValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PayloadValue::Null => serializer.serialize_unit(),
            PayloadValue::Bool(b) => serializer.serialize_bool(*b),
            PayloadValue::Number(n) => n.serialize(serializer),
            PayloadValue::String(s) => serializer.serialize_str(s),
            PayloadValue::ObjectId(id) => id.serialize(serializer),
            PayloadValue::DateTime(dt) => serializer.serialize_str(&format_datetime(dt)),
            PayloadValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PayloadValue::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}
