#![allow(non_snake_case)]

use super::*;
use crate::error::CompactError;
use crate::reader::CompactReader;
use crate::serializer::CompactSerializer;
use crate::value::{Scalar, ScalarKind};
use time::macros::date;

#[derive(Debug, Clone, PartialEq)]
struct Tag(String);

struct TagSerializer;

impl CompactSerializer for TagSerializer {
    type Value = Tag;

    fn type_name(&self) -> &str {
        "test.Tag"
    }

    fn write(&self, writer: &mut CompactWriter<'_>, value: &Tag) -> CompactResult<()> {
        writer.write_string("label", &value.0);
        Ok(())
    }

    fn read(&self, reader: &CompactReader<'_>) -> CompactResult<Tag> {
        Ok(Tag(reader.read_string("label")?))
    }
}

fn registry_with_tag() -> SerializerRegistry {
    let mut registry = SerializerRegistry::new();
    registry.register(TagSerializer).unwrap();
    registry
}

#[test]
fn CompactWriter___scalar_writes___produce_value_fields() {
    let registry = SerializerRegistry::new();
    let mut writer = CompactWriter::new(&registry, "test.Sample");

    writer.write_int32("count", 3);
    writer.write_boolean("flag", true);
    writer.write_date("day", date!(2024 - 01 - 31));
    let record = writer.finish();

    assert_eq!(record.type_name(), "test.Sample");
    assert_eq!(record.get("count"), Some(&FieldValue::Value(Scalar::Int32(3))));
    assert_eq!(record.get("flag"), Some(&FieldValue::Value(Scalar::Boolean(true))));
    assert_eq!(
        record.get("day"),
        Some(&FieldValue::Value(Scalar::Date(date!(2024 - 01 - 31))))
    );
}

#[test]
fn CompactWriter___nullable_none___keeps_kind() {
    let registry = SerializerRegistry::new();
    let mut writer = CompactWriter::new(&registry, "test.Sample");

    writer.write_nullable_int64("id", None);
    writer.write_nullable_string("name", None);
    let record = writer.finish();

    assert_eq!(record.get("id"), Some(&FieldValue::Nullable(ScalarKind::Int64, None)));
    assert_eq!(record.get("name"), Some(&FieldValue::Nullable(ScalarKind::String, None)));
}

#[test]
fn CompactWriter___empty_array___keeps_kind() {
    let registry = SerializerRegistry::new();
    let mut writer = CompactWriter::new(&registry, "test.Sample");

    writer.write_array_of_float64("values", &[]);
    let record = writer.finish();

    assert_eq!(
        record.get("values"),
        Some(&FieldValue::Array(ScalarKind::Float64, vec![]))
    );
}

#[test]
fn CompactWriter___array_of_nullable_string___keeps_gaps() {
    let registry = SerializerRegistry::new();
    let mut writer = CompactWriter::new(&registry, "test.Sample");

    writer.write_array_of_nullable_string("names", &[Some("a".to_string()), None]);
    let record = writer.finish();

    assert_eq!(
        record.get("names"),
        Some(&FieldValue::ArrayOfNullable(
            ScalarKind::String,
            vec![Some(Scalar::String("a".to_string())), None]
        ))
    );
}

#[test]
fn CompactWriter___same_field_twice___keeps_last_value() {
    let registry = SerializerRegistry::new();
    let mut writer = CompactWriter::new(&registry, "test.Sample");

    writer.write_int8("x", 1);
    writer.write_int8("x", 2);
    let record = writer.finish();

    assert_eq!(record.len(), 1);
    assert_eq!(record.get("x"), Some(&FieldValue::Value(Scalar::Int8(2))));
}

#[test]
fn CompactWriter___write_compact___nests_registered_record() {
    let registry = registry_with_tag();
    let mut writer = CompactWriter::new(&registry, "test.Sample");

    writer.write_compact("tag", &Tag("red".into())).unwrap();
    let record = writer.finish();

    let Some(FieldValue::Compact(nested)) = record.get("tag") else {
        panic!("expected nested record, got {:?}", record.get("tag"));
    };
    assert_eq!(nested.type_name(), "test.Tag");
    assert_eq!(
        nested.get("label"),
        Some(&FieldValue::Value(Scalar::String("red".into())))
    );
}

#[test]
fn CompactWriter___write_array_of_compact___nests_each_record() {
    let registry = registry_with_tag();
    let mut writer = CompactWriter::new(&registry, "test.Sample");

    writer
        .write_array_of_compact("tags", &[Tag("a".into()), Tag("b".into())])
        .unwrap();
    let record = writer.finish();

    let Some(FieldValue::ArrayOfCompact(nested)) = record.get("tags") else {
        panic!("expected nested records");
    };
    assert_eq!(nested.len(), 2);
}

#[test]
fn CompactWriter___write_compact_unregistered___returns_error() {
    let registry = SerializerRegistry::new();
    let mut writer = CompactWriter::new(&registry, "test.Sample");

    let result = writer.write_compact("tag", &Tag("red".into()));

    assert!(matches!(result, Err(CompactError::UnregisteredType(_))));
}
