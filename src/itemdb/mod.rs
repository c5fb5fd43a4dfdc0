//! Core ItemDB decoding engine.
//!
//! # Module Organization
//!
//! - [`types`]: schema, decoded models, and errors
//! - [`codec`]: string de-obfuscation
//! - [`format`]: header and record parsing
//! - [`reader`] / [`iter`]: container-level drivers

pub mod codec;
pub mod format;
pub mod iter;
pub mod reader;
pub mod types;
pub mod utils;

use std::io::Read;

use types::models::ItemDb;
use types::schema::Schema;

pub use reader::ItemDbReader;
pub use types::error::{ItemDbError, Result};
pub use types::schema::ITEM_SCHEMA;

/// Decodes a complete container from `reader` using `schema`.
///
/// Shortcut for `ItemDbReader::new(reader, schema)?.read_all()`.
pub fn decode<R: Read>(reader: R, schema: &Schema) -> Result<ItemDb> {
    ItemDbReader::new(reader, schema)?.read_all()
}
