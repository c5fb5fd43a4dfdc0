//! In-memory fixture builders shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use itemdb_reader::itemdb::codec::xor;
use itemdb_reader::{FieldKind, IntWidth, OpaqueWidth, Schema};

/// Little-endian byte builder for hand-written containers.
#[derive(Debug, Default, Clone)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    pub fn header(version: u16, count: u32) -> Self {
        Self::default().u16(version).u32(count)
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.0.push(v);
        self
    }

    pub fn u16(mut self, v: u16) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn str(self, s: &str) -> Self {
        self.u16(s.len() as u16).raw(s.as_bytes())
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn build(self) -> Vec<u8> {
        self.0
    }
}

/// Plain-text values for one record; unset integers are derived from the
/// field position (see [`default_int`]), unset strings are `"<field>#<index>"`.
#[derive(Debug, Default, Clone)]
pub struct Values {
    pub ints: HashMap<&'static str, u64>,
    pub strs: HashMap<&'static str, String>,
}

impl Values {
    pub fn int(mut self, name: &'static str, v: u64) -> Self {
        self.ints.insert(name, v);
        self
    }

    pub fn str(mut self, name: &'static str, v: &str) -> Self {
        self.strs.insert(name, v.to_string());
        self
    }
}

pub fn default_int(position: usize, width: IntWidth) -> u64 {
    let max = match width {
        IntWidth::U8 => u64::from(u8::MAX),
        IntWidth::U16 => u64::from(u16::MAX),
        IntWidth::U32 => u64::from(u32::MAX),
    };
    (position as u64 * 7 + 1) % max
}

pub fn default_str(name: &str, index: u32) -> String {
    format!("{}#{}", name, index)
}

/// Appends the wire form of record `index` as a writer for `schema` would.
///
/// The identity field is always written as `index` unless overridden.
pub fn encode_record(mut out: Bytes, schema: &Schema, version: u16, index: u32, values: &Values) -> Bytes {
    for (position, field) in schema.fields().iter().enumerate() {
        if !field.is_present(version) {
            continue;
        }
        out = match field.kind {
            FieldKind::Integer(width) => {
                let v = values.ints.get(field.name).copied().unwrap_or_else(|| {
                    if position == 0 {
                        u64::from(index)
                    } else {
                        default_int(position, width)
                    }
                });
                match width {
                    IntWidth::U8 => out.u8(v as u8),
                    IntWidth::U16 => out.u16(v as u16),
                    IntWidth::U32 => out.u32(v as u32),
                }
            }
            FieldKind::Str(key) => {
                let plain = values
                    .strs
                    .get(field.name)
                    .cloned()
                    .unwrap_or_else(|| default_str(field.name, index));
                let wire = match key {
                    Some(key) if version >= 3 => xor::apply(&plain, key, index as usize),
                    _ => plain,
                };
                out.str(&wire)
            }
            FieldKind::Opaque(OpaqueWidth::Fixed(n)) => out.raw(&vec![0xAB; n]),
            FieldKind::Opaque(OpaqueWidth::Dynamic) => out.str("opaque"),
        };
    }
    out
}

/// A container of `count` records with default values.
pub fn encode_container(schema: &Schema, version: u16, count: u32) -> Vec<u8> {
    let mut out = Bytes::header(version, count);
    for index in 0..count {
        out = encode_record(out, schema, version, index, &Values::default());
    }
    out.build()
}
