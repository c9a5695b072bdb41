//! Typed Firestore JSON values.
//!
//! Firestore's REST surface wraps every field in a single-key object naming
//! its type: `{"stringValue": "Plov"}`, `{"integerValue": "45"}` (int64s are
//! strings on the wire), `{"mapValue": {"fields": {...}}}`. This module
//! models that shape so the rest of the crate works with ordinary Rust
//! values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A Firestore document field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    #[serde(rename = "nullValue")]
    Null(()),
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    /// Int64, carried as a decimal string on the wire.
    #[serde(rename = "integerValue")]
    Integer(String),
    #[serde(rename = "doubleValue")]
    Double(f64),
    /// RFC 3339 timestamp.
    #[serde(rename = "timestampValue")]
    Timestamp(String),
    #[serde(rename = "stringValue")]
    String(String),
    #[serde(rename = "arrayValue")]
    Array(ArrayValue),
    #[serde(rename = "mapValue")]
    Map(MapValue),
}

/// Wire shape of an array value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

/// Wire shape of a map value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    /// A string value.
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// An int64 value.
    #[must_use]
    pub fn integer(i: i64) -> Self {
        Self::Integer(i.to_string())
    }

    /// A double value.
    #[must_use]
    pub const fn double(d: f64) -> Self {
        Self::Double(d)
    }

    /// An array of values.
    #[must_use]
    pub fn array(values: Vec<Self>) -> Self {
        Self::Array(ArrayValue { values })
    }

    /// A map of named values.
    #[must_use]
    pub fn map(fields: BTreeMap<String, Self>) -> Self {
        Self::Map(MapValue { fields })
    }

    /// An RFC 3339 timestamp value.
    #[must_use]
    pub fn timestamp(ts: chrono::DateTime<chrono::Utc>) -> Self {
        Self::Timestamp(ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true))
    }

    /// The string content, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean content, if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer content, if this is an integer value with a well-formed
    /// payload.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// A numeric reading of the value.
    ///
    /// Documents written by earlier client revisions store numbers
    /// inconsistently (`integerValue` vs `doubleValue`), so numeric fields
    /// accept either.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            #[allow(clippy::cast_precision_loss)] // catalog numbers are small
            Self::Integer(s) => s.parse::<i64>().ok().map(|i| i as f64),
            _ => None,
        }
    }

    /// The element list, if this is an array value.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(array) => Some(&array.values),
            _ => None,
        }
    }

    /// The named fields, if this is a map value.
    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map(map) => Some(&map.fields),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(value: &Value) -> Value {
        let json = serde_json::to_string(value).expect("serialize");
        serde_json::from_str(&json).expect("deserialize")
    }

    #[test]
    fn test_string_wire_shape() {
        let json = serde_json::to_string(&Value::string("Plov")).expect("serialize");
        assert_eq!(json, r#"{"stringValue":"Plov"}"#);
    }

    #[test]
    fn test_integer_is_string_on_wire() {
        let json = serde_json::to_string(&Value::integer(45)).expect("serialize");
        assert_eq!(json, r#"{"integerValue":"45"}"#);
        assert_eq!(Value::integer(45).as_i64(), Some(45));
    }

    #[test]
    fn test_map_wire_shape() {
        let mut fields = BTreeMap::new();
        fields.insert("count".to_owned(), Value::integer(2));
        let json = serde_json::to_string(&Value::map(fields)).expect("serialize");
        assert_eq!(json, r#"{"mapValue":{"fields":{"count":{"integerValue":"2"}}}}"#);
    }

    #[test]
    fn test_empty_map_decodes() {
        let value: Value = serde_json::from_str(r#"{"mapValue":{}}"#).expect("deserialize");
        assert_eq!(value.as_map().map(BTreeMap::len), Some(0));
    }

    #[test]
    fn test_null_wire_shape() {
        let json = serde_json::to_string(&Value::Null(())).expect("serialize");
        assert_eq!(json, r#"{"nullValue":null}"#);
        let back: Value = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Value::Null(()));
    }

    #[test]
    fn test_round_trips() {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_owned(), Value::string("Lagman"));
        fields.insert(
            "ingredients".to_owned(),
            Value::array(vec![Value::string("noodles"), Value::string("beef")]),
        );
        fields.insert("price".to_owned(), Value::double(12.5));
        fields.insert("available".to_owned(), Value::Boolean(true));

        for value in [
            Value::string("x"),
            Value::integer(-3),
            Value::double(0.25),
            Value::Boolean(false),
            Value::Timestamp("2024-11-02T10:00:00Z".to_owned()),
            Value::array(vec![Value::integer(1), Value::string("two")]),
            Value::map(fields),
        ] {
            assert_eq!(round_trip(&value), value);
        }
    }

    #[test]
    fn test_as_f64_accepts_both_number_encodings() {
        assert_eq!(Value::double(9.5).as_f64(), Some(9.5));
        assert_eq!(Value::integer(9).as_f64(), Some(9.0));
        assert_eq!(Value::string("9").as_f64(), None);
    }

    #[test]
    fn test_malformed_integer_payload() {
        let value = Value::Integer("not-a-number".to_owned());
        assert_eq!(value.as_i64(), None);
    }
}
