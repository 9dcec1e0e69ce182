//! Tagged representation of raw JSON-LD input.
//!
//! Input records arrive as loosely-typed JSON. They are converted once into
//! `RecordValue` so the traversal can pattern-match on shape instead of
//! probing types ad hoc. Only `String` and `Integer` count as scalars.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{RecordError, Result};

/// Key carrying a record's declared type.
pub const TYPE_KEY: &str = "@type";

/// Key carrying a record's identifier.
pub const ID_KEY: &str = "@id";

/// A raw input value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum RecordValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<RecordValue>),
    Object(Record),
}

impl RecordValue {
    /// Strings and integers are the only values stored as node fields.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::String(_) | Self::Integer(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Record> {
        match self {
            Self::Object(record) => Some(record),
            _ => None,
        }
    }

    /// Object entries of a relation value.
    ///
    /// A relation may be a single object or a list of them; any other
    /// shape, and any non-object list element, yields nothing.
    pub fn objects(&self) -> Vec<&Record> {
        match self {
            Self::Object(record) => vec![record],
            Self::List(items) => items.iter().filter_map(RecordValue::as_object).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<serde_json::Value> for RecordValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(Record::from(map)),
        }
    }
}

impl From<&str> for RecordValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for RecordValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// One linked-data object: raw key → value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Record {
    entries: BTreeMap<String, RecordValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for assembling fixtures.
    pub fn with(mut self, key: &str, value: impl Into<RecordValue>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.entries.get(key)
    }

    /// Look up a key that must be present.
    pub fn require(&self, key: &str, context: &str) -> Result<&RecordValue> {
        self.entries
            .get(key)
            .ok_or_else(|| RecordError::missing(key, context))
    }

    /// Look up a key that must be present; non-string values read as `None`.
    pub fn require_str(&self, key: &str, context: &str) -> Result<Option<&str>> {
        Ok(self.require(key, context)?.as_str())
    }

    /// Whether the record's required `@type` equals `tag`, ignoring ASCII case.
    pub fn has_type(&self, tag: &str, context: &str) -> Result<bool> {
        Ok(self
            .require_str(TYPE_KEY, context)?
            .is_some_and(|t| t.eq_ignore_ascii_case(tag)))
    }

    /// Raw entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(k, v)| (k, RecordValue::from(v)))
                .collect(),
        }
    }
}

impl From<Record> for RecordValue {
    fn from(value: Record) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<RecordValue>> for RecordValue {
    fn from(value: Vec<RecordValue>) -> Self {
        Self::List(value)
    }
}
