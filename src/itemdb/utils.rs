//! Low-level byte reading utilities.
//!
//! All readers are forward-only and little-endian. Errors carry an empty
//! [`Location`]; callers attach the record and field with [`ItemDbError::at`].

use std::io::{self, Read};
use byteorder::{LittleEndian, ReadBytesExt};
use log::trace;

use crate::itemdb::types::error::{ItemDbError, Location, Result};
use crate::itemdb::types::schema::IntWidth;

/// Read a 1, 2 or 4 byte little-endian unsigned integer.
pub fn read_uint<R: Read>(reader: &mut R, width: IntWidth) -> Result<u64> {
    let value = match width {
        IntWidth::U8 => reader.read_u8().map(u64::from),
        IntWidth::U16 => reader.read_u16::<LittleEndian>().map(u64::from),
        IntWidth::U32 => reader.read_u32::<LittleEndian>().map(u64::from),
    };
    value.map_err(eof_or_io)
}

/// Read a u16 length-prefixed UTF-8 string.
///
/// There is no null terminator; the prefix is the byte length.
pub fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let len = read_len(reader)?;
    let mut bytes = vec![0u8; len];
    reader.read_exact(&mut bytes).map_err(eof_or_io)?;
    String::from_utf8(bytes).map_err(|e| ItemDbError::InvalidUtf8 {
        at: Location::default(),
        source: e.utf8_error(),
    })
}

/// Consume exactly `n` bytes without decoding them.
pub fn skip_bytes<R: Read>(reader: &mut R, n: usize) -> Result<()> {
    let copied = io::copy(&mut reader.by_ref().take(n as u64), &mut io::sink())?;
    if copied < n as u64 {
        return Err(ItemDbError::UnexpectedEof { at: Location::default() });
    }
    trace!("Skipped {} opaque bytes", n);
    Ok(())
}

fn read_len<R: Read>(reader: &mut R) -> Result<usize> {
    Ok(reader.read_u16::<LittleEndian>().map_err(eof_or_io)? as usize)
}

/// Map a short read to [`ItemDbError::UnexpectedEof`]; anything else stays an I/O error.
fn eof_or_io(e: io::Error) -> ItemDbError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        ItemDbError::UnexpectedEof { at: Location::default() }
    } else {
        ItemDbError::Io(e)
    }
}
