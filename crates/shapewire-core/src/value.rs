//! Dynamic shape instances.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};

use crate::descriptor::ScalarKind;
use crate::error::{CodecError, CodecResult};

/// A UTC instant truncated to millisecond precision.
///
/// The wire format carries milliseconds, so truncating on construction keeps
/// formatting and parsing exact inverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp, dropping sub-millisecond precision.
    #[must_use]
    pub fn new(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(3))
    }

    /// Create a timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    /// The underlying `DateTime<Utc>`.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Consume into a `DateTime<Utc>`.
    #[must_use]
    pub fn into_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::new(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::format_timestamp(self))
    }
}

/// A primitive field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// Text.
    String(String),
    /// 32-bit integer.
    Integer(i32),
    /// 64-bit integer.
    Long(i64),
    /// Boolean.
    Boolean(bool),
    /// Timestamp.
    Timestamp(Timestamp),
}

impl Scalar {
    /// The kind of this scalar.
    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::String(_) => ScalarKind::String,
            Self::Integer(_) => ScalarKind::Integer,
            Self::Long(_) => ScalarKind::Long,
            Self::Boolean(_) => ScalarKind::Boolean,
            Self::Timestamp(_) => ScalarKind::Timestamp,
        }
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<Timestamp> for Scalar {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(Timestamp::new(v))
    }
}

/// Any field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A scalar.
    Scalar(Scalar),
    /// A nested shape instance.
    Shape(Record),
    /// A list; `None` elements still occupy an index on the wire.
    List(Vec<Option<Value>>),
    /// A string-keyed map in insertion order.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Short name of the value kind, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(s) => s.kind().as_str(),
            Self::Shape(_) => "shape",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Build a list value from present elements.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::List(items.into_iter().map(|v| Some(v.into())).collect())
    }

    /// Build a map value from key/value pairs.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

macro_rules! impl_value_from_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Scalar(v.into())
                }
            }
        )+
    };
}

impl_value_from_scalar!(String, &str, i32, i64, bool, Timestamp, DateTime<Utc>);

impl From<Scalar> for Value {
    fn from(v: Scalar) -> Self {
        Self::Scalar(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Self::Shape(v)
    }
}

/// The dynamic instance of a shape: present fields keyed by field name.
///
/// Absent fields are simply missing. Field order on the wire comes from the
/// shape's descriptor, not from the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<&'static str, Value>,
}

impl Record {
    /// An empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::set`].
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, name: &'static str, value: impl Into<Value>) {
        self.fields.insert(name, value.into());
    }

    /// Set a field only when `value` is `Some`.
    pub fn set_opt<V: Into<Value>>(&mut self, name: &'static str, value: Option<V>) {
        if let Some(v) = value {
            self.set(name, v);
        }
    }

    /// Borrow a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Mutably borrow a field.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Remove and return a field.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Whether the field is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of present fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate present fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    /// Take a string field.
    pub fn take_string(&mut self, name: &'static str) -> CodecResult<Option<String>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Scalar(Scalar::String(s))) => Ok(Some(s)),
            Some(other) => Err(mismatch(name, "string", &other)),
        }
    }

    /// Take an integer field.
    pub fn take_i32(&mut self, name: &'static str) -> CodecResult<Option<i32>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Scalar(Scalar::Integer(v))) => Ok(Some(v)),
            Some(other) => Err(mismatch(name, "integer", &other)),
        }
    }

    /// Take a long field.
    pub fn take_i64(&mut self, name: &'static str) -> CodecResult<Option<i64>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Scalar(Scalar::Long(v))) => Ok(Some(v)),
            Some(other) => Err(mismatch(name, "long", &other)),
        }
    }

    /// Take a boolean field.
    pub fn take_bool(&mut self, name: &'static str) -> CodecResult<Option<bool>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Scalar(Scalar::Boolean(v))) => Ok(Some(v)),
            Some(other) => Err(mismatch(name, "boolean", &other)),
        }
    }

    /// Take a timestamp field.
    pub fn take_timestamp(&mut self, name: &'static str) -> CodecResult<Option<Timestamp>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Scalar(Scalar::Timestamp(v))) => Ok(Some(v)),
            Some(other) => Err(mismatch(name, "timestamp", &other)),
        }
    }

    /// Take a nested shape field.
    pub fn take_record(&mut self, name: &'static str) -> CodecResult<Option<Record>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Shape(r)) => Ok(Some(r)),
            Some(other) => Err(mismatch(name, "shape", &other)),
        }
    }

    /// Take a list field, keeping `None` slots.
    pub fn take_list(&mut self, name: &'static str) -> CodecResult<Option<Vec<Option<Value>>>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::List(items)) => Ok(Some(items)),
            Some(other) => Err(mismatch(name, "list", &other)),
        }
    }

    /// Take a map field.
    pub fn take_map(&mut self, name: &'static str) -> CodecResult<Option<Vec<(String, Value)>>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Map(entries)) => Ok(Some(entries)),
            Some(other) => Err(mismatch(name, "map", &other)),
        }
    }
}

fn mismatch(field: &'static str, expected: &'static str, found: &Value) -> CodecError {
    CodecError::TypeMismatch {
        field,
        expected,
        found: found.kind_name(),
    }
}
