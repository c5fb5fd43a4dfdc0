//! # itemdb-reader
//!
//! A reader for ItemDB containers: the versioned binary file that stores
//! item definitions as a flat sequence of fixed-schema records.
//!
//! Supports every schema revision up to format version 16, including the
//! XOR-obfuscated item names used from version 3 onward.
pub mod itemdb;
pub mod report;

// Re-export the main types for convenience
pub use itemdb::{
    decode,
    reader::ItemDbReader,
    iter::RecordIterator,
    types::{
        error::{ItemDbError, Location, Result},
        models::{FieldValue, ItemDb, ItemDbHeader, Record},
        schema::{FieldDescriptor, FieldKind, IntWidth, OpaqueWidth, Schema, XorKey, ITEM_SCHEMA},
    },
};
