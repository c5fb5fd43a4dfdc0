//! Custom error types for the itemdb-reader crate.

use std::fmt;
use std::str::Utf8Error;
use thiserror::Error;

/// Where in the container a decode failure happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    /// Record index, or `None` for the container header.
    pub record: Option<u32>,
    pub field: Option<&'static str>,
}

impl Location {
    pub fn header(field: &'static str) -> Self {
        Self { record: None, field: Some(field) }
    }

    pub fn field(record: u32, field: &'static str) -> Self {
        Self { record: Some(record), field: Some(field) }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.record, self.field) {
            (Some(record), Some(field)) => write!(f, "record {}, field `{}`", record, field),
            (Some(record), None) => write!(f, "record {}", record),
            (None, Some(field)) => write!(f, "header field `{}`", field),
            (None, None) => write!(f, "unknown position"),
        }
    }
}

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum ItemDbError {
    /// An error originating from I/O operations other than running out of data.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The byte source ended before a field's bytes were available.
    #[error("Unexpected end of data at {at}")]
    UnexpectedEof { at: Location },

    /// A string field does not hold valid UTF-8.
    #[error("Invalid UTF-8 at {at}: {source}")]
    InvalidUtf8 {
        at: Location,
        #[source]
        source: Utf8Error,
    },

    /// A schema descriptor uses a kind the decoder cannot frame on the wire.
    #[error("Unsupported field kind for `{field}`: {reason}")]
    UnsupportedFieldKind { field: &'static str, reason: String },

    /// The schema is structurally unusable (empty, bad identity field, duplicate names).
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// The decoded identity field does not match the record's position,
    /// meaning the schema does not describe this file's layout.
    #[error("Offset mismatch, schema is likely out-of-date ({expected} != {actual}, v{version})")]
    SchemaDrift { expected: u32, actual: u64, version: u16 },
}

impl ItemDbError {
    /// Attaches a record/field position to errors that carry one.
    ///
    /// Errors that already have a complete location are left untouched.
    pub fn at(self, location: Location) -> Self {
        match self {
            ItemDbError::UnexpectedEof { at } => ItemDbError::UnexpectedEof {
                at: merge(at, location),
            },
            ItemDbError::InvalidUtf8 { at, source } => ItemDbError::InvalidUtf8 {
                at: merge(at, location),
                source,
            },
            other => other,
        }
    }

    /// Returns the position of the failure, if one is known.
    pub fn location(&self) -> Option<Location> {
        match self {
            ItemDbError::UnexpectedEof { at } | ItemDbError::InvalidUtf8 { at, .. } => Some(*at),
            _ => None,
        }
    }
}

fn merge(current: Location, outer: Location) -> Location {
    Location {
        record: current.record.or(outer.record),
        field: current.field.or(outer.field),
    }
}

/// A convenience `Result` type alias using the crate's `ItemDbError` type.
pub type Result<T> = std::result::Result<T, ItemDbError>;
