#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(FieldValue::Value(Scalar::Int32(1)), "int32" ; "scalar")]
#[test_case(FieldValue::Nullable(ScalarKind::Int64, None), "nullableInt64" ; "nullable")]
#[test_case(FieldValue::Array(ScalarKind::String, vec![]), "string[]" ; "array")]
#[test_case(FieldValue::ArrayOfNullable(ScalarKind::Boolean, vec![None]), "nullableBoolean[]" ; "array of nullable")]
#[test_case(FieldValue::ArrayOfCompact(vec![]), "compact[]" ; "array of compact")]
fn FieldValue___describe___matches_schema_text(value: FieldValue, expected: &str) {
    assert_eq!(value.describe(), expected);
}

#[test]
fn ScalarKind___tags___round_trip() {
    for kind in ScalarKind::ALL {
        assert_eq!(ScalarKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(ScalarKind::from_tag(200), None);
}

#[test]
fn CompactPrimitive___from_other_kind___returns_none() {
    let scalar = Scalar::Int64(5);

    assert_eq!(<i32 as CompactPrimitive>::from_scalar(&scalar), None);
    assert_eq!(<i64 as CompactPrimitive>::from_scalar(&scalar), Some(5));
}

#[test]
fn CompactPrimitive___string___round_trips() {
    let scalar = "hello".to_string().into_scalar();

    assert_eq!(scalar.kind(), ScalarKind::String);
    assert_eq!(String::from_scalar(&scalar), Some("hello".to_string()));
}
