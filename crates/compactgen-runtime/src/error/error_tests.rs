#![allow(non_snake_case)]

use super::*;

#[test]
fn CompactError___missing_field___displays_record_and_field() {
    let err = CompactError::MissingField {
        type_name: "com.example.Example1".into(),
        field: "id".into(),
    };

    assert_eq!(
        err.to_string(),
        "missing field id in record com.example.Example1"
    );
}

#[test]
fn CompactError___field_type_mismatch___displays_both_types() {
    let err = CompactError::FieldTypeMismatch {
        type_name: "A".into(),
        field: "x".into(),
        expected: "int32".into(),
        found: "nullableInt32".into(),
    };

    assert_eq!(
        err.to_string(),
        "field x in record A is nullableInt32, expected int32"
    );
}

#[test]
fn CompactError___unregistered_type___names_rust_type() {
    let err = CompactError::UnregisteredType(std::any::type_name::<u8>());

    assert_eq!(err.to_string(), "no serializer registered for u8");
}
