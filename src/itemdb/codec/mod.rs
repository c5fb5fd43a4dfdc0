//! Codec layer for string de-obfuscation.
//!
//! # Submodules
//!
//! - [`xor`][]: per-record XOR stream applied to keyed string fields (v3+)

pub mod xor;
