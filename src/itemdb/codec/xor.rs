//! Per-record XOR obfuscation of string fields.
//!
//! # Algorithm
//! For the character at position `p` (counted in characters, not bytes):
//! `out[p] = text[p] ^ key[(p + offset) % key.len()]`
//!
//! `offset` is the record's index in the container. Applying the transform
//! twice with the same key and offset restores the input.

use log::trace;

use crate::itemdb::types::schema::XorKey;

/// XOR every character of `text` against the rotating key.
pub fn apply(text: &str, key: XorKey, offset: usize) -> String {
    trace!("Applying XOR key to {} characters at offset {}", text.chars().count(), offset);

    let key = key.as_bytes();
    text.chars()
        .enumerate()
        .map(|(p, c)| {
            let k = key[(p + offset) % key.len()];
            // An ASCII key byte only touches the low 7 bits, which cannot move a
            // scalar value into the surrogate range.
            char::from_u32(c as u32 ^ u32::from(k)).unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect()
}
