//! File format parsing layer for ItemDB containers.
//!
//! # Module Organization
//!
//! - [`header`]: Parses the version/count header
//! - [`record`]: Decodes one record against a schema
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Header         │ ← header::parse()
//! │  (u16, u32)     │
//! ├─────────────────┤
//! │  Record 0       │ ← record::decode()
//! │  Record 1       │
//! │  ...            │   fields per schema, version-gated
//! └─────────────────┘
//! ```

pub mod header;
pub mod record;
