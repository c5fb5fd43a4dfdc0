//! Decoding of a single record against a schema.
//!
//! Fields are read strictly in schema order. A field whose `min_version` is
//! newer than the container contributes no bytes and decodes to `None`.
//! Once every field is read, the identity field is checked against the
//! record's position to detect a schema that does not match the file.

use std::io::Read;
use log::{debug, trace};

use crate::itemdb::codec::xor;
use crate::itemdb::types::{
    error::{ItemDbError, Location, Result},
    models::{FieldValue, Record},
    schema::{FieldDescriptor, FieldKind, OpaqueWidth, Schema},
};
use crate::itemdb::utils;

/// First format version whose keyed strings are XOR-obfuscated.
pub const XOR_MIN_VERSION: u16 = 3;

/// Collects field values while a record is being decoded.
#[derive(Debug)]
pub struct RecordBuilder {
    fields: Vec<(&'static str, Option<FieldValue>)>,
}

impl RecordBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { fields: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, name: &'static str, value: Option<FieldValue>) {
        self.fields.push((name, value));
    }

    /// Freezes the accumulated fields into an immutable [`Record`].
    pub fn finish(self) -> Record {
        Record::from_fields(self.fields)
    }
}

/// Decodes the record at position `index` from `reader`.
///
/// # Errors
/// - [`ItemDbError::UnexpectedEof`] / [`ItemDbError::InvalidUtf8`] with the
///   record index and field name attached
/// - [`ItemDbError::SchemaDrift`] if the identity field is not `index`
/// - [`ItemDbError::InvalidSchema`] if the identity field did not decode to an integer
pub fn decode<R: Read>(
    reader: &mut R,
    schema: &Schema,
    version: u16,
    index: u32,
) -> Result<Record> {
    let mut builder = RecordBuilder::with_capacity(schema.len());

    for field in schema.fields() {
        let value = decode_field(reader, field, version, index)
            .map_err(|e| e.at(Location::field(index, field.name)))?;
        builder.push(field.name, value);
    }

    let record = builder.finish();
    verify_identity(&record, schema, version, index)?;
    debug!("Decoded record {}", index);
    Ok(record)
}

fn decode_field<R: Read>(
    reader: &mut R,
    field: &FieldDescriptor,
    version: u16,
    index: u32,
) -> Result<Option<FieldValue>> {
    if !field.is_present(version) {
        trace!(
            "Field `{}` introduced in v{}, absent in v{}",
            field.name, field.min_version, version
        );
        return Ok(None);
    }

    match field.kind {
        FieldKind::Integer(width) => {
            let value = utils::read_uint(reader, width)?;
            trace!("Field `{}` = {}", field.name, value);
            Ok(Some(FieldValue::Integer(value)))
        }
        FieldKind::Str(key) => {
            let raw = utils::read_string(reader)?;
            let text = match key {
                Some(key) if version >= XOR_MIN_VERSION => xor::apply(&raw, key, index as usize),
                _ => raw,
            };
            trace!("Field `{}` = {:?}", field.name, text);
            Ok(Some(FieldValue::Str(text)))
        }
        FieldKind::Opaque(OpaqueWidth::Fixed(n)) => {
            utils::skip_bytes(reader, n)?;
            Ok(None)
        }
        FieldKind::Opaque(OpaqueWidth::Dynamic) => {
            // Framed and validated like any string; the content is dropped.
            utils::read_string(reader)?;
            Ok(None)
        }
    }
}

fn verify_identity(record: &Record, schema: &Schema, version: u16, index: u32) -> Result<()> {
    let actual = record.id().ok_or_else(|| {
        let name = schema.identity().map(|f| f.name).unwrap_or("<none>");
        ItemDbError::InvalidSchema(format!(
            "identity field `{}` did not decode to an integer in v{}",
            name, version
        ))
    })?;

    if actual != u64::from(index) {
        return Err(ItemDbError::SchemaDrift { expected: index, actual, version });
    }
    Ok(())
}
