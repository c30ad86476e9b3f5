//! Schema-less value type for persisting arbitrary nested data.
//!
//! `Value` is a closed sum type: every piece of data is one of the
//! variants below, composed recursively.  It is totally ordered (floats
//! by `f64::total_cmp`), which lets sets and maps use any `Value` as a
//! key and keeps their encoding canonical.
//!
//! Serialization is lossless: floats travel as their IEEE-754 bits
//! (NaN and infinities survive), bytes as base64, and tuples, sets and
//! maps keep their own variant instead of collapsing into lists.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// An arbitrary, self-describing value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(#[serde(with = "float_bits")] f64),
    Str(String),
    Bytes(#[serde(with = "base64_bytes")] Vec<u8>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(BTreeSet<Value>),
    Map(#[serde(with = "map_entries")] BTreeMap<Value, Value>),
    /// An application-defined composite with named fields.
    Record {
        name: String,
        fields: BTreeMap<String, Value>,
    },
}

impl Value {
    /// Short name of the variant, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Record { .. } => "record",
        }
    }

    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(data.into())
    }

    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Set(items.into_iter().collect())
    }

    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::Map(entries.into_iter().collect())
    }

    pub fn record(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Self::Record {
            name: name.into(),
            fields: fields.into_iter().collect(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
            Self::Str(_) => 4,
            Self::Bytes(_) => 5,
            Self::List(_) => 6,
            Self::Tuple(_) => 7,
            Self::Set(_) => 8,
            Self::Map(_) => 9,
            Self::Record { .. } => 10,
        }
    }

    /// Convert to plain JSON for display.
    ///
    /// Lossy: bytes become base64 strings, tuples and sets become arrays,
    /// records become objects, non-finite floats become `null`, and map
    /// keys that are not strings are rendered with their JSON text.
    pub fn into_json(self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(b),
            Self::Int(i) => Json::from(i),
            Self::Float(f) => serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number),
            Self::Str(s) => Json::String(s),
            Self::Bytes(b) => Json::String(BASE64.encode(b)),
            Self::List(items) | Self::Tuple(items) => {
                Json::Array(items.into_iter().map(Self::into_json).collect())
            }
            Self::Set(items) => Json::Array(items.into_iter().map(Self::into_json).collect()),
            Self::Map(entries) => Json::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| {
                        let key = match k {
                            Self::Str(s) => s,
                            other => other.into_json().to_string(),
                        };
                        (key, v.into_json())
                    })
                    .collect(),
            ),
            Self::Record { fields, .. } => Json::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, v.into_json()))
                    .collect(),
            ),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a.cmp(b),
            (Self::Set(a), Self::Set(b)) => a.cmp(b),
            (Self::Map(a), Self::Map(b)) => a.cmp(b),
            (
                Self::Record {
                    name: an,
                    fields: af,
                },
                Self::Record {
                    name: bn,
                    fields: bf,
                },
            ) => an.cmp(bn).then_with(|| af.cmp(bf)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

// ── Conversions ──────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    /// Objects become maps with string keys; numbers become `Int` when
    /// they fit in an `i64` and `Float` otherwise.
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Self::Str(s),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Json::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Self::Str(k), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

mod float_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.to_bits())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        u64::deserialize(deserializer).map(f64::from_bits)
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(data))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        BASE64.decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Maps are stored as a list of `[key, value]` pairs because JSON object
/// keys can only be strings.
mod map_entries {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::Value;

    pub(super) fn serialize<S: Serializer>(
        map: &BTreeMap<Value, Value>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(map.iter())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<Value, Value>, D::Error> {
        let pairs = Vec::<(Value, Value)>::deserialize(deserializer)?;
        let expected = pairs.len();
        let map: BTreeMap<Value, Value> = pairs.into_iter().collect();
        if map.len() != expected {
            return Err(serde::de::Error::custom("duplicate map key"));
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_order_by_rank_first() {
        assert!(Value::Null < Value::Bool(false));
        assert!(Value::Int(i64::MAX) < Value::Float(f64::NEG_INFINITY));
        assert!(Value::List(vec![]) < Value::Tuple(vec![]));
    }

    #[test]
    fn floats_compare_bitwise() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    }

    #[test]
    fn list_and_tuple_are_distinct() {
        let items = vec![Value::Int(1)];
        assert_ne!(Value::List(items.clone()), Value::Tuple(items));
    }

    #[test]
    fn json_conversion_keeps_ints_and_floats_apart() {
        let json: serde_json::Value = serde_json::json!({"a": 1, "b": 2.5, "c": [true, null]});
        let value = Value::from(json.clone());
        let Value::Map(map) = &value else {
            panic!("expected map, got {}", value.kind());
        };
        assert_eq!(map[&Value::from("a")], Value::Int(1));
        assert_eq!(map[&Value::from("b")], Value::Float(2.5));
        assert_eq!(value.into_json(), json);
    }

    #[test]
    fn into_json_stringifies_non_string_keys() {
        let value = Value::map([(Value::Int(1), Value::Int(2))]);
        assert_eq!(value.into_json(), serde_json::json!({"1": 2}));
    }

    #[test]
    fn serde_keeps_special_floats_and_bytes() {
        let value = Value::tuple([
            Value::Float(f64::NAN),
            Value::Float(f64::INFINITY),
            Value::bytes(vec![0u8, 255, 7]),
        ]);
        let json = serde_json::to_vec(&value).unwrap();
        let back: Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn duplicate_map_keys_are_rejected() {
        let json = br#"{"Map":[["Null","Null"],["Null",{"Int":1}]]}"#;
        assert!(serde_json::from_slice::<Value>(json).is_err());
    }
}
