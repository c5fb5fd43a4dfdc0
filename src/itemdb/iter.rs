//! Lazy, sequential access to the records of a container.
//!
//! # Example
//! ```no_run
//! # use itemdb_reader::{ItemDbReader, ITEM_SCHEMA};
//! let file = std::io::BufReader::new(std::fs::File::open("items.dat").unwrap());
//! let reader = ItemDbReader::new(file, &ITEM_SCHEMA).unwrap();
//! for result in reader.iter_records() {
//!     let record = result.unwrap();
//!     println!("{:?} {:?}", record.id(), record.string("name"));
//! }
//! ```

use std::io::Read;

use super::format::record;
use super::types::error::Result;
use super::types::models::Record;
use super::types::schema::Schema;

/// Iterator over the records of a container, decoded one at a time.
///
/// Yields exactly `count` items. After the first error it yields `None`:
/// the stream position is unknown at that point, so there is no way to
/// resume. Created by [`ItemDbReader::iter_records()`](crate::ItemDbReader::iter_records).
pub struct RecordIterator<'s, R> {
    reader: R,
    schema: &'s Schema,
    version: u16,
    count: u32,
    next_index: u32,
    failed: bool,
}

impl<'s, R: Read> RecordIterator<'s, R> {
    pub(super) fn new(reader: R, schema: &'s Schema, version: u16, count: u32) -> Self {
        Self {
            reader,
            schema,
            version,
            count,
            next_index: 0,
            failed: false,
        }
    }

    /// Index of the record the next call to `next()` will decode.
    pub fn position(&self) -> u32 {
        self.next_index
    }

    /// Returns the underlying reader, positioned after the last decoded record.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn remaining(&self) -> usize {
        if self.failed {
            0
        } else {
            (self.count - self.next_index) as usize
        }
    }
}

impl<'s, R: Read> Iterator for RecordIterator<'s, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_index >= self.count {
            return None;
        }

        let index = self.next_index;
        match record::decode(&mut self.reader, self.schema, self.version, index) {
            Ok(record) => {
                self.next_index += 1;
                Some(Ok(record))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}
