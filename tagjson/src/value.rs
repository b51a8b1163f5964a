//! The [`JsonValue`] tree and its mutation API.

use std::fmt;

use indexmap::IndexMap;

use crate::{Error, Result};

/// Object storage. Keys are unique; iteration follows insertion order so serialized output is
/// stable, but equality between two maps ignores order.
pub type Map = IndexMap<String, JsonValue>;

/// Which variant a [`JsonValue`] holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Object,
    Array,
}

impl Kind {
    pub fn desc(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Object => "object",
            Kind::Array => "array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.desc())
    }
}

/// A JSON value. Containers own their children outright: there is no sharing between nodes, so
/// cloning deep-copies the subtree and dropping tears it down recursively.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Object(Map),
    Array(Vec<JsonValue>),
}

macro_rules! mismatch {
    ($expected:expr, $found:expr) => {
        Err(Error::TypeMismatch {
            expected: $expected,
            found: $found.kind(),
        })
    };
}

impl JsonValue {
    /// An empty object.
    pub fn object() -> Self {
        JsonValue::Object(Map::new())
    }

    pub fn kind(&self) -> Kind {
        match self {
            JsonValue::Null => Kind::Null,
            JsonValue::Bool(_) => Kind::Bool,
            JsonValue::Int(_) => Kind::Int,
            JsonValue::Float(_) => Kind::Float,
            JsonValue::String(_) => Kind::String,
            JsonValue::Object(_) => Kind::Object,
            JsonValue::Array(_) => Kind::Array,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            JsonValue::Bool(b) => Ok(*b),
            other => mismatch!(Kind::Bool, other),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            JsonValue::Int(i) => Ok(*i),
            other => mismatch!(Kind::Int, other),
        }
    }

    /// Only a `Float` yields a float. An `Int` is a mismatch, not a silent widening.
    pub fn as_float(&self) -> Result<f64> {
        match self {
            JsonValue::Float(f) => Ok(*f),
            other => mismatch!(Kind::Float, other),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            JsonValue::String(s) => Ok(s),
            other => mismatch!(Kind::String, other),
        }
    }

    pub fn as_object(&self) -> Result<&Map> {
        match self {
            JsonValue::Object(map) => Ok(map),
            other => mismatch!(Kind::Object, other),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Map> {
        match self {
            JsonValue::Object(map) => Ok(map),
            other => mismatch!(Kind::Object, other),
        }
    }

    pub fn as_array(&self) -> Result<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Ok(items),
            other => mismatch!(Kind::Array, other),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<JsonValue>> {
        match self {
            JsonValue::Array(items) => Ok(items),
            other => mismatch!(Kind::Array, other),
        }
    }

    pub fn into_object(self) -> Result<Map> {
        match self {
            JsonValue::Object(map) => Ok(map),
            other => mismatch!(Kind::Object, other),
        }
    }

    pub fn into_array(self) -> Result<Vec<JsonValue>> {
        match self {
            JsonValue::Array(items) => Ok(items),
            other => mismatch!(Kind::Array, other),
        }
    }

    /// Field lookup. Non-objects have no fields, so this is `None` for them rather than an error.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut JsonValue> {
        match self {
            JsonValue::Object(map) => map.get_mut(key),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or overwrite `key`. A `Null` target is first turned into an empty object; any
    /// other non-object target is left untouched and reported as
    /// [`Error::InvalidMutationTarget`]. Returns the value previously stored under `key`.
    pub fn set_field(&mut self, key: impl Into<String>, value: JsonValue) -> Result<Option<JsonValue>> {
        if self.is_null() {
            *self = JsonValue::object();
        }
        match self {
            JsonValue::Object(map) => Ok(map.insert(key.into(), value)),
            other => Err(Error::InvalidMutationTarget {
                op: "set a field",
                found: other.kind(),
            }),
        }
    }

    /// Owning form of [`JsonValue::set_field`], convenient for building payloads in one
    /// expression.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Result<Self> {
        self.set_field(key, value.into())?;
        Ok(self)
    }

    /// Append to an array, turning a `Null` target into an empty array first.
    pub fn push(&mut self, value: JsonValue) -> Result<()> {
        if self.is_null() {
            *self = JsonValue::Array(Vec::new());
        }
        match self {
            JsonValue::Array(items) => {
                items.push(value);
                Ok(())
            }
            other => Err(Error::InvalidMutationTarget {
                op: "push an element",
                found: other.kind(),
            }),
        }
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<i64> for JsonValue {
    fn from(i: i64) -> Self {
        JsonValue::Int(i)
    }
}

impl From<i32> for JsonValue {
    fn from(i: i32) -> Self {
        JsonValue::Int(i64::from(i))
    }
}

impl From<u32> for JsonValue {
    fn from(i: u32) -> Self {
        JsonValue::Int(i64::from(i))
    }
}

impl From<f64> for JsonValue {
    fn from(f: f64) -> Self {
        JsonValue::Float(f)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_owned())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<Map> for JsonValue {
    fn from(map: Map) -> Self {
        JsonValue::Object(map)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(items)
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(JsonValue::Null, Into::into)
    }
}

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (K, JsonValue)>>(iter: I) -> Self {
        JsonValue::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
