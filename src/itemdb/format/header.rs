//! ItemDB container header parsing.

use std::io::Read;
use log::{info, warn};

use crate::itemdb::types::{
    error::{Location, Result},
    models::ItemDbHeader,
    schema::{IntWidth, Schema},
};
use crate::itemdb::utils;

/// Parses the container header from the start of the stream.
///
/// # Header Structure
/// ```text
/// [2 bytes] Format version (little-endian u16)
/// [4 bytes] Record count (little-endian u32)
/// ```
///
/// Logs a warning when the version is newer than any revision `schema`
/// describes; decoding still proceeds and the identity check catches drift.
pub fn parse<R: Read>(reader: &mut R, schema: &Schema) -> Result<ItemDbHeader> {
    let version = utils::read_uint(reader, IntWidth::U16)
        .map_err(|e| e.at(Location::header("version")))? as u16;
    let count = utils::read_uint(reader, IntWidth::U32)
        .map_err(|e| e.at(Location::header("count")))? as u32;

    let latest = schema.latest_version();
    if version > latest {
        warn!(
            "ItemDB v{} is newer than the schema's latest revision (v{}); \
             fields added since are not decoded",
            version, latest
        );
    }

    info!("ItemDB header parsed: version={}, records={}", version, count);
    Ok(ItemDbHeader { version, count })
}
