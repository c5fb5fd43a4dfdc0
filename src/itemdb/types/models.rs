//! Decoded ItemDB data structures.
//!
//! - [`ItemDbHeader`]: format version and record count
//! - [`Record`]: one decoded item, field values in schema order
//! - [`ItemDb`]: the header plus all records

use std::fmt;

/// Container header: `u16` format version followed by `u32` record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDbHeader {
    pub version: u16,
    pub count: u32,
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(u64),
    Str(String),
}

impl FieldValue {
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            FieldValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s.as_str()),
            FieldValue::Integer(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Str(s) => f.write_str(s),
        }
    }
}

/// One decoded record.
///
/// Holds an entry for every schema field, in schema order. A field's value is
/// `None` when it did not exist in the container's format version or when
/// its content is opaque; a present integer `0` stays `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(&'static str, Option<FieldValue>)>,
}

impl Record {
    pub(crate) fn from_fields(fields: Vec<(&'static str, Option<FieldValue>)>) -> Self {
        Self { fields }
    }

    /// The identity field's value.
    pub fn id(&self) -> Option<u64> {
        self.fields.first().and_then(|(_, v)| v.as_ref()).and_then(FieldValue::as_integer)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn integer(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(FieldValue::as_integer)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&FieldValue>)> {
        self.fields.iter().map(|(n, v)| (*n, v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A fully decoded ItemDB container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDb {
    pub version: u16,
    pub count: u32,
    /// Records in file order; position `i` holds the record with id `i`.
    pub records: Vec<Record>,
}
