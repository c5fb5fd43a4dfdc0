//! Delimited text report of a decoded container.
//!
//! The first line lists the columns, then one line per record:
//! ```text
//! id|properties|type|material|name|...
//! 0|0|0|0|"Blank"|...
//! ```
//! Integers are written in decimal and strings are wrapped in double quotes
//! with no escaping.

use std::io::{self, Write};
use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};

use crate::itemdb::types::models::{FieldValue, ItemDb};
use crate::itemdb::types::schema::{FieldDescriptor, Schema};

/// Output settings for [`write_report`].
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Encoding the report text is written in.
    pub encoding: &'static Encoding,
    pub delimiter: char,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { encoding: UTF_8, delimiter: '|' }
    }
}

/// Resolves a WHATWG encoding label such as `utf-8`, `latin1` or `gbk`.
pub fn parse_encoding(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Writes `db` as a delimited report.
///
/// Columns are the schema fields that carry a value in the container's
/// format version (opaque fields are never listed), so an empty container
/// still produces a header line.
pub fn write_report<W: Write>(
    out: &mut W,
    db: &ItemDb,
    schema: &Schema,
    options: &ReportOptions,
) -> io::Result<()> {
    let columns: Vec<&FieldDescriptor> = schema.value_fields(db.version).collect();
    let delimiter = options.delimiter.to_string();
    let delimiter = delimiter.as_str();
    debug!("Writing report with {} columns for {} records", columns.len(), db.records.len());

    if options.encoding.output_encoding() != options.encoding {
        warn!(
            "{} cannot be used for output; writing {} instead",
            options.encoding.name(),
            options.encoding.output_encoding().name()
        );
    }

    let header = columns.iter().map(|f| f.name).collect::<Vec<_>>().join(delimiter);
    write_line(out, &header, options.encoding)?;

    for record in &db.records {
        let line = columns
            .iter()
            .map(|f| format_value(record.get(f.name)))
            .collect::<Vec<_>>()
            .join(delimiter);
        write_line(out, &line, options.encoding)?;
    }
    Ok(())
}

fn format_value(value: Option<&FieldValue>) -> String {
    match value {
        Some(value @ FieldValue::Str(_)) => format!("\"{}\"", value),
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

fn write_line<W: Write>(out: &mut W, line: &str, encoding: &'static Encoding) -> io::Result<()> {
    let (bytes, _, _) = encoding.encode(line);
    out.write_all(&bytes)?;
    out.write_all(b"\n")
}
