//! Record layout definitions.
//!
//! A [`Schema`] is the ordered list of fields making up one record on the
//! wire. Order is load-bearing: it defines the byte layout for every format
//! version, and fields introduced in a later version carry a `min_version`
//! so older containers skip them without consuming any bytes.

use std::borrow::Cow;
use std::collections::HashSet;

use super::error::{ItemDbError, Result};

/// Byte width of an integer field. Integers never carry a width prefix on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    U8,
    U16,
    U32,
}

impl IntWidth {
    pub const fn bytes(self) -> usize {
        match self {
            IntWidth::U8 => 1,
            IntWidth::U16 => 2,
            IntWidth::U32 => 4,
        }
    }
}

/// Framing of a field whose content is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpaqueWidth {
    /// Exactly `n` raw bytes.
    Fixed(usize),
    /// A u16 length-prefixed blob.
    Dynamic,
}

/// A short ASCII key used to de-obfuscate a string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorKey(&'static str);

impl XorKey {
    /// Creates a key from a literal.
    ///
    /// # Panics
    /// If `key` is empty or not ASCII. In a `const` item this is a compile
    /// error; at runtime it panics, so use [`try_new`](Self::try_new) for keys
    /// that are not literals.
    pub const fn new(key: &'static str) -> Self {
        match Self::try_new(key) {
            Some(key) => key,
            None => panic!("XOR key must be non-empty ASCII"),
        }
    }

    /// Creates a key, or `None` if `key` is empty or not ASCII.
    pub const fn try_new(key: &'static str) -> Option<Self> {
        let bytes = key.as_bytes();
        if bytes.is_empty() {
            return None;
        }
        let mut i = 0;
        while i < bytes.len() {
            if !bytes[i].is_ascii() {
                return None;
            }
            i += 1;
        }
        Some(Self(key))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn as_bytes(&self) -> &'static [u8] {
        self.0.as_bytes()
    }
}

/// How a field is laid out on the wire and what it decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Little-endian unsigned integer, decoded to `u64`.
    Integer(IntWidth),
    /// u16 length-prefixed UTF-8 string, optionally XOR-obfuscated.
    Str(Option<XorKey>),
    /// Bytes that are consumed and discarded.
    Opaque(OpaqueWidth),
}

/// One field of a record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// First format version in which this field exists on the wire.
    pub min_version: u16,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, min_version: 1 }
    }

    pub const fn u8(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer(IntWidth::U8))
    }

    pub const fn u16(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer(IntWidth::U16))
    }

    pub const fn u32(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer(IntWidth::U32))
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::Str(None))
    }

    pub const fn xor_string(name: &'static str, key: XorKey) -> Self {
        Self::new(name, FieldKind::Str(Some(key)))
    }

    pub const fn opaque(name: &'static str, width: usize) -> Self {
        Self::new(name, FieldKind::Opaque(OpaqueWidth::Fixed(width)))
    }

    pub const fn opaque_dynamic(name: &'static str) -> Self {
        Self::new(name, FieldKind::Opaque(OpaqueWidth::Dynamic))
    }

    /// Sets the format version that introduced this field.
    pub const fn since(mut self, version: u16) -> Self {
        self.min_version = version;
        self
    }

    /// Whether the field exists on the wire for a container of `version`.
    pub fn is_present(&self, version: u16) -> bool {
        self.min_version <= version
    }

    /// Minimum number of bytes the field occupies for `version`.
    ///
    /// Length-prefixed fields count only their 2-byte prefix.
    pub fn min_wire_size(&self, version: u16) -> usize {
        if !self.is_present(version) {
            return 0;
        }
        match self.kind {
            FieldKind::Integer(width) => width.bytes(),
            FieldKind::Opaque(OpaqueWidth::Fixed(n)) => n,
            FieldKind::Str(_) | FieldKind::Opaque(OpaqueWidth::Dynamic) => 2,
        }
    }
}

/// An immutable, ordered record layout.
///
/// The first field is the identity field: an integer that must equal the
/// record's position in the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Cow<'static, [FieldDescriptor]>,
}

impl Schema {
    /// Wraps a static field table without validation.
    pub const fn from_static(fields: &'static [FieldDescriptor]) -> Self {
        Self { fields: Cow::Borrowed(fields) }
    }

    /// Builds a schema from a runtime field list, validating it first.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        let schema = Self { fields: Cow::Owned(fields) };
        schema.validate()?;
        Ok(schema)
    }

    /// Checks that the layout can be decoded.
    ///
    /// # Errors
    /// - [`ItemDbError::InvalidSchema`] for an empty schema, an identity field
    ///   that is not an integer present since version 1, or duplicate names.
    /// - [`ItemDbError::UnsupportedFieldKind`] for a zero-width opaque field.
    pub fn validate(&self) -> Result<()> {
        let identity = self
            .fields
            .first()
            .ok_or_else(|| ItemDbError::InvalidSchema("schema has no fields".to_string()))?;
        if !matches!(identity.kind, FieldKind::Integer(_)) {
            return Err(ItemDbError::InvalidSchema(format!(
                "identity field `{}` must be an integer",
                identity.name
            )));
        }
        if identity.min_version > 1 {
            return Err(ItemDbError::InvalidSchema(format!(
                "identity field `{}` must be present since version 1, not {}",
                identity.name, identity.min_version
            )));
        }

        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in self.fields.iter() {
            if !seen.insert(field.name) {
                return Err(ItemDbError::InvalidSchema(format!("duplicate field `{}`", field.name)));
            }
            if field.kind == FieldKind::Opaque(OpaqueWidth::Fixed(0)) {
                return Err(ItemDbError::UnsupportedFieldKind {
                    field: field.name,
                    reason: "fixed opaque width must be non-zero; \
                             use a dynamic field for length-prefixed blobs"
                        .to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn identity(&self) -> Option<&FieldDescriptor> {
        self.fields.first()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The newest format version this schema knows about.
    pub fn latest_version(&self) -> u16 {
        self.fields.iter().map(|f| f.min_version).max().unwrap_or(1)
    }

    /// Fields that decode to a value for a container of `version`.
    pub fn value_fields(&self, version: u16) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(move |f| f.is_present(version) && !matches!(f.kind, FieldKind::Opaque(_)))
    }

    /// Smallest possible size of one record for `version`, in bytes.
    pub fn min_record_size(&self, version: u16) -> usize {
        self.fields.iter().map(|f| f.min_wire_size(version)).sum()
    }
}

/// Key for the item `name` field, applied from format version 3 onward.
pub const NAME_XOR_KEY: XorKey = XorKey::new("PBG892FXX982ABC*");

/// Field table of the current item definition layout (format version 16).
pub const ITEM_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::u32("id"),
    FieldDescriptor::u16("properties"),
    FieldDescriptor::u8("type"),
    FieldDescriptor::u8("material"),
    FieldDescriptor::xor_string("name", NAME_XOR_KEY),
    FieldDescriptor::string("file_name"),
    FieldDescriptor::u32("file_hash"),
    FieldDescriptor::u8("visual_type"),
    FieldDescriptor::u32("cook_time"),
    FieldDescriptor::u8("tex_x"),
    FieldDescriptor::u8("tex_y"),
    FieldDescriptor::u8("storage_type"),
    FieldDescriptor::u8("layer"),
    FieldDescriptor::u8("collision_type"),
    FieldDescriptor::u8("hardness"),
    FieldDescriptor::u32("regen_time"),
    FieldDescriptor::u8("clothing_type"),
    FieldDescriptor::u16("rarity"),
    FieldDescriptor::u8("max_hold"),
    FieldDescriptor::string("alt_file_path"),
    FieldDescriptor::u32("alt_file_hash"),
    FieldDescriptor::u32("anim_ms"),
    FieldDescriptor::string("pet_name").since(4),
    FieldDescriptor::string("pet_prefix").since(4),
    FieldDescriptor::string("pet_suffix").since(4),
    FieldDescriptor::string("pet_ability").since(5),
    FieldDescriptor::u8("seed_base"),
    FieldDescriptor::u8("seed_over"),
    FieldDescriptor::u8("tree_base"),
    FieldDescriptor::u8("tree_over"),
    FieldDescriptor::u32("bg_col"),
    FieldDescriptor::u32("fg_col"),
    FieldDescriptor::u16("seed1"),
    FieldDescriptor::u16("seed2"),
    FieldDescriptor::u32("bloom_time"),
    FieldDescriptor::u32("anim_type").since(7),
    FieldDescriptor::string("anim_string").since(7),
    FieldDescriptor::string("anim_tex").since(8),
    FieldDescriptor::string("anim_string2").since(8),
    FieldDescriptor::u32("dlayer1").since(8),
    FieldDescriptor::u32("dlayer2").since(8),
    FieldDescriptor::u16("properties2").since(9),
    FieldDescriptor::opaque("_unknown1", 62).since(9),
    FieldDescriptor::u32("tile_range").since(10),
    FieldDescriptor::u32("pile_range").since(10),
    FieldDescriptor::string("custom_punch").since(11),
    FieldDescriptor::opaque("_unknown2", 13).since(12),
    FieldDescriptor::u32("clock_div").since(13),
    FieldDescriptor::u32("parent_id").since(14),
    FieldDescriptor::opaque("_unknown3", 25).since(15),
    FieldDescriptor::string("alt_sit_path").since(15),
    FieldDescriptor::string("_unknown4").since(16),
];

/// The canonical item definition schema.
pub static ITEM_SCHEMA: Schema = Schema::from_static(ITEM_FIELDS);
