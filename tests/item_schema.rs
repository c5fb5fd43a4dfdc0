mod common;

use std::io::Cursor;

use common::{default_str, encode_container, encode_record, Bytes, Values};
use itemdb_reader::itemdb::codec::xor;
use itemdb_reader::itemdb::types::schema::NAME_XOR_KEY;
use itemdb_reader::{decode, FieldKind, IntWidth, ItemDbError, ItemDbReader, OpaqueWidth, ITEM_SCHEMA};

#[test]
fn canonical_layout_is_valid_and_ordered() {
    ITEM_SCHEMA.validate().unwrap();
    assert_eq!(ITEM_SCHEMA.len(), 52);
    assert_eq!(ITEM_SCHEMA.latest_version(), 16);

    let names: Vec<&str> = ITEM_SCHEMA.fields().iter().map(|f| f.name).collect();
    assert_eq!(
        &names[..8],
        &["id", "properties", "type", "material", "name", "file_name", "file_hash", "visual_type"]
    );
    assert_eq!(names.last(), Some(&"_unknown4"));

    let id = ITEM_SCHEMA.identity().unwrap();
    assert_eq!(id.kind, FieldKind::Integer(IntWidth::U32));
    assert_eq!(ITEM_SCHEMA.get("name").unwrap().kind, FieldKind::Str(Some(NAME_XOR_KEY)));
    assert_eq!(NAME_XOR_KEY.as_str(), "PBG892FXX982ABC*");
}

#[test]
fn canonical_layout_revisions() {
    let expect = [
        ("pet_name", 4),
        ("pet_ability", 5),
        ("anim_type", 7),
        ("dlayer2", 8),
        ("_unknown1", 9),
        ("pile_range", 10),
        ("custom_punch", 11),
        ("_unknown2", 12),
        ("clock_div", 13),
        ("parent_id", 14),
        ("alt_sit_path", 15),
        ("_unknown4", 16),
        ("bloom_time", 1),
    ];
    for (name, version) in expect {
        assert_eq!(ITEM_SCHEMA.get(name).unwrap().min_version, version, "{}", name);
    }

    assert_eq!(ITEM_SCHEMA.get("_unknown1").unwrap().kind, FieldKind::Opaque(OpaqueWidth::Fixed(62)));
    assert_eq!(ITEM_SCHEMA.get("_unknown2").unwrap().kind, FieldKind::Opaque(OpaqueWidth::Fixed(13)));
    assert_eq!(ITEM_SCHEMA.get("_unknown3").unwrap().kind, FieldKind::Opaque(OpaqueWidth::Fixed(25)));
    assert_eq!(ITEM_SCHEMA.get("_unknown4").unwrap().kind, FieldKind::Str(None));
}

#[test]
fn fixed_bytes_per_version() {
    assert_eq!(ITEM_SCHEMA.min_record_size(1), 65);
    assert_eq!(ITEM_SCHEMA.min_record_size(3), 65);
    assert_eq!(ITEM_SCHEMA.min_record_size(4), 71);
    assert_eq!(ITEM_SCHEMA.min_record_size(9), 155);
    assert_eq!(ITEM_SCHEMA.min_record_size(16), 215);
}

#[test]
fn decodes_every_revision() {
    for version in 1..=16u16 {
        let data = encode_container(&ITEM_SCHEMA, version, 5);
        let mut cursor = Cursor::new(&data[..]);
        let db = ItemDbReader::new(&mut cursor, &ITEM_SCHEMA).unwrap().read_all().unwrap();

        assert_eq!(cursor.position() as usize, data.len(), "v{}", version);
        assert_eq!(db.version, version);
        assert_eq!(db.records.len(), 5);
        for (i, rec) in db.records.iter().enumerate() {
            assert_eq!(rec.id(), Some(i as u64));
            assert_eq!(rec.string("name"), Some(default_str("name", i as u32).as_str()), "v{}", version);
            assert_eq!(rec.is_present("pet_name"), version >= 4);
            assert_eq!(rec.is_present("pet_ability"), version >= 5);
            assert_eq!(rec.is_present("_unknown4"), version >= 16);
            assert!(!rec.is_present("_unknown1"));
        }
    }
}

#[test]
fn names_are_deobfuscated_with_record_index() {
    let mut out = Bytes::header(16, 3);
    for (i, name) in ["Blank", "Dirt", "Dirt Seed"].iter().enumerate() {
        out = encode_record(out, &ITEM_SCHEMA, 16, i as u32, &Values::default().str("name", name));
    }
    let db = decode(&out.build()[..], &ITEM_SCHEMA).unwrap();

    let names: Vec<&str> = db.records.iter().map(|r| r.string("name").unwrap()).collect();
    assert_eq!(names, vec!["Blank", "Dirt", "Dirt Seed"]);
}

#[test]
fn wire_name_is_the_xored_text() {
    let wire = xor::apply("Dirt", NAME_XOR_KEY, 2);
    let out = encode_record(Bytes::header(2, 1), &ITEM_SCHEMA, 2, 0, &Values::default().str("name", &wire));
    // v2 keeps the raw string
    let db = decode(&out.build()[..], &ITEM_SCHEMA).unwrap();
    assert_eq!(db.records[0].string("name"), Some(wire.as_str()));
}

#[test]
fn stale_schema_is_detected_as_drift() {
    // Every value after the id is zero, so the shifted read stays in bounds
    let zeroed = ITEM_SCHEMA.fields().iter().skip(1).fold(Values::default(), |v, f| match f.kind {
        FieldKind::Integer(_) => v.int(f.name, 0),
        FieldKind::Str(_) => v.str(f.name, ""),
        FieldKind::Opaque(_) => v,
    });
    let mut out = Bytes::header(5, 3);
    for index in 0..3 {
        out = encode_record(out, &ITEM_SCHEMA, 5, index, &zeroed);
    }
    let mut data = out.build();
    // v5 layout (with pet_ability) read as if it were v4
    data[0] = 4;

    // Record 0 ends two bytes early; record 1's id is read from `00 00 01 00`
    let err = decode(&data[..], &ITEM_SCHEMA).unwrap_err();
    assert!(
        matches!(err, ItemDbError::SchemaDrift { expected: 1, actual: 65536, version: 4 }),
        "got {:?}",
        err
    );
}

#[test]
fn newer_versions_still_decode_with_latest_layout() {
    let mut data = encode_container(&ITEM_SCHEMA, 16, 2);
    data[0] = 17;
    let db = decode(&data[..], &ITEM_SCHEMA).unwrap();
    assert_eq!(db.version, 17);
    assert_eq!(db.records.len(), 2);
}

#[test]
fn present_zero_integers_stay_present() {
    let values = Values::default().int("properties", 0).int("rarity", 0);
    let out = encode_record(Bytes::header(1, 1), &ITEM_SCHEMA, 1, 0, &values);
    let db = decode(&out.build()[..], &ITEM_SCHEMA).unwrap();
    assert_eq!(db.records[0].integer("properties"), Some(0));
    assert_eq!(db.records[0].integer("rarity"), Some(0));
    assert_eq!(db.records[0].integer("clock_div"), None);
}
