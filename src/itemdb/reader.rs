use std::io::Read;
use log::info;

use super::format;
use super::iter::RecordIterator;
use super::types::error::Result;
use super::types::models::{ItemDb, ItemDbHeader};
use super::types::schema::Schema;

/// The main reader for ItemDB containers.
///
/// Parses the header on construction; records are decoded on demand through
/// [`iter_records`](Self::iter_records) or all at once with
/// [`read_all`](Self::read_all).
#[derive(Debug)]
pub struct ItemDbReader<'s, R> {
    reader: R,
    schema: &'s Schema,
    pub header: ItemDbHeader,
}

impl<'s, R: Read> ItemDbReader<'s, R> {
    /// Reads the container header from `reader`.
    ///
    /// # Arguments
    /// * `reader` - Forward-only byte source positioned at the start of the container
    /// * `schema` - Record layout; pass [`ITEM_SCHEMA`](crate::ITEM_SCHEMA) for item definitions
    ///
    /// # Errors
    /// Returns an error if:
    /// - The schema fails validation
    /// - The source ends before the 6-byte header
    pub fn new(mut reader: R, schema: &'s Schema) -> Result<Self> {
        schema.validate()?;
        let header = format::header::parse(&mut reader, schema)?;
        Ok(Self { reader, schema, header })
    }

    pub fn version(&self) -> u16 {
        self.header.version
    }

    pub fn count(&self) -> u32 {
        self.header.count
    }

    /// Returns a lazy iterator over the container's records.
    pub fn iter_records(self) -> RecordIterator<'s, R> {
        RecordIterator::new(self.reader, self.schema, self.header.version, self.header.count)
    }

    /// Decodes every record. The first failing record aborts the whole read.
    pub fn read_all(self) -> Result<ItemDb> {
        let ItemDbHeader { version, count } = self.header;
        let records = self.iter_records().collect::<Result<Vec<_>>>()?;
        info!("Decoded {} records from ItemDB v{}", records.len(), version);
        Ok(ItemDb { version, count, records })
    }
}
