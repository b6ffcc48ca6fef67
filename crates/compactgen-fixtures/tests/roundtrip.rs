//! Generated bindings written and read back through the runtime.

use compactgen_fixtures::external::Money;
use compactgen_fixtures::generated::address::Address;
use compactgen_fixtures::generated::all_types::AllTypes;
use compactgen_fixtures::generated::arrays::Arrays;
use compactgen_fixtures::generated::customer::Customer;
use compactgen_fixtures::generated::example1::Example1;
use compactgen_fixtures::generated::example2::Example2;
use compactgen_fixtures::generated::example3::Example3;
use compactgen_fixtures::generated::invoice::Invoice;
use compactgen_fixtures::generated::invoice_line::InvoiceLine;
use compactgen_fixtures::generated::nullable_arrays::NullableArrays;
use compactgen_fixtures::generated::nullables::Nullables;
use compactgen_fixtures::generated::scalars::{Scalars, ScalarsSerializer};
use compactgen_fixtures::generated::versioned::Versioned;
use compactgen_fixtures::registry;
use compactgen_runtime::{CompactError, CompactSerializer, SerializerRegistry};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use time::macros::{date, datetime, time};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn scalars() -> Scalars {
    Scalars::new(
        true,
        -8,
        16,
        -32,
        64,
        3.5,
        -0.25,
        "text".to_string(),
        date!(2024-02-29),
        time!(13:45:30.5),
        datetime!(2024-02-29 13:45:30),
        datetime!(2024-02-29 13:45:30 +2),
    )
}

fn invoice() -> Invoice {
    Invoice::new(
        "INV-1".to_string(),
        Customer::new(
            "Ada".to_string(),
            Address::new("1 Main St".to_string(), "Springfield".to_string(), None),
            vec!["vip".to_string()],
        ),
        Money::new("EUR", 12_345),
        vec![
            InvoiceLine::new("A-1".to_string(), 2, 10.5),
            InvoiceLine::new("B-2".to_string(), 1, 99.0),
        ],
        date!(2024-01-15),
        Some("paid".to_string()),
    )
}

#[test]
fn example1_round_trips_with_nested_and_external_fields() {
    let registry = registry().unwrap();
    let value = Example1::new(
        Example2::new(7),
        vec![Example3::new("a".to_string()), Example3::new("b".to_string())],
        Money::new("USD", 500),
    );

    let bytes = registry.to_bytes(&value).unwrap();
    let back: Example1 = registry.from_bytes(&bytes).unwrap();

    assert_eq!(back, value);
    assert_eq!(back.example().id(), 7);
    assert_eq!(back.examples()[1].label(), "b");
}

#[test]
fn invoice_round_trips_across_namespaces() {
    let registry = registry().unwrap();
    let value = invoice();

    let back: Invoice = registry.from_bytes(&registry.to_bytes(&value).unwrap()).unwrap();

    assert_eq!(back, value);
    assert_eq!(back.customer().address().zip(), None);
    assert_eq!(back.note(), Some("paid"));
}

#[test]
fn record_type_names_are_fingerprints() {
    let registry = registry().unwrap();

    let record = registry.serialize(&invoice()).unwrap();

    assert_eq!(record.type_name(), Invoice::TYPE_NAME);
    assert_eq!(registry.type_name_of::<Scalars>(), Some(Scalars::TYPE_NAME));
    assert_eq!(ScalarsSerializer.type_name(), Scalars::TYPE_NAME);
    assert_ne!(Invoice::TYPE_NAME, InvoiceLine::TYPE_NAME);
}

#[test]
fn all_types_round_trip_with_values_absent_values_and_empty_arrays() {
    let registry = registry().unwrap();
    let value = AllTypes::new(
        scalars(),
        Nullables::new(
            Some(false),
            None,
            Some(-16),
            None,
            Some(i64::MIN),
            None,
            Some(f64::MAX),
            None,
            Some(date!(1970-01-01)),
            None,
            Some(datetime!(1999-12-31 23:59:59)),
            None,
        ),
        Arrays::new(
            vec![true, false],
            vec![i8::MIN, i8::MAX],
            Vec::new(),
            vec![1, 2, 3],
            Vec::new(),
            vec![0.5],
            Vec::new(),
            vec!["x".to_string(), String::new()],
            vec![date!(2000-01-01)],
            Vec::new(),
            Vec::new(),
            vec![datetime!(2000-01-01 00:00 -5)],
        ),
        NullableArrays::new(
            vec![Some(true), None],
            Vec::new(),
            vec![None],
            vec![Some(1), None, Some(3)],
            Vec::new(),
            vec![None, Some(1.5)],
            Vec::new(),
            vec![Some("y".to_string()), None],
            Vec::new(),
            vec![Some(time!(0:00)), None],
            Vec::new(),
            vec![None],
        ),
        vec![scalars(), scalars()],
    );

    let back: AllTypes = registry.from_bytes(&registry.to_bytes(&value).unwrap()).unwrap();

    assert_eq!(back, value);
}

#[test]
fn versioned_reads_defaults_for_fields_missing_from_legacy_records() {
    let registry = registry().unwrap();
    let current = Versioned::new(1, false, 1, 2, 3, 4, 5.0, 6.0, None);
    let mut legacy = registry.serialize(&current).unwrap();
    for field in ["mboolean", "mbyte", "mshort", "mint", "mlong", "mfloat", "mdouble", "level"] {
        legacy.remove(field);
    }

    let back: Versioned = registry.deserialize(&legacy).unwrap();

    assert_eq!(back.id(), 1);
    assert!(back.mboolean());
    assert_eq!(back.mbyte(), 8);
    assert_eq!(back.mshort(), -16);
    assert_eq!(back.mint(), 32);
    assert_eq!(back.mlong(), 64);
    assert_eq!(back.mfloat(), 32.32);
    assert_eq!(back.mdouble(), 64.64);
    assert_eq!(back.level(), Some(3));
}

#[test]
fn versioned_keeps_written_values_over_defaults() {
    let registry = registry().unwrap();
    let value = Versioned::new(1, false, 1, 2, 3, 4, 5.0, 6.0, None);

    let back: Versioned = registry.from_bytes(&registry.to_bytes(&value).unwrap()).unwrap();

    assert_eq!(back, value);
    assert_eq!(back.level(), None);
}

#[test]
fn missing_field_without_default_fails() {
    let registry = registry().unwrap();
    let mut record = registry.serialize(&Example2::new(1)).unwrap();
    record.remove("id");

    let err = registry.deserialize::<Example2>(&record).unwrap_err();

    assert!(matches!(err, CompactError::MissingField { ref field, .. } if field == "id"));
}

#[test]
fn nested_type_without_registered_serializer_fails() {
    let mut registry = SerializerRegistry::new();
    compactgen_fixtures::register_all(&mut registry).unwrap();
    let value = Example1::new(Example2::new(1), Vec::new(), Money::new("USD", 1));

    let err = registry.serialize(&value).unwrap_err();

    assert!(matches!(err, CompactError::UnregisteredType(_)));
}

#[test]
fn register_all_twice_is_rejected() {
    let mut registry = registry().unwrap();

    let err = compactgen_fixtures::register_all(&mut registry).unwrap_err();

    assert!(matches!(
        err,
        CompactError::DuplicateValueType(_) | CompactError::DuplicateTypeName(_)
    ));
}

#[test]
fn display_prints_fields_with_nulls_and_lists() {
    let value = Customer::new(
        "Ada".to_string(),
        Address::new("1 Main St".to_string(), "Springfield".to_string(), None),
        vec!["a".to_string(), "b".to_string()],
    );

    assert_eq!(
        value.to_string(),
        "<Customer> {name=Ada, address=<Address> {street=1 Main St, city=Springfield, zip=null}, tags=[a, b]}"
    );
}

#[test]
fn equal_values_hash_alike_including_signed_zero() {
    let a = InvoiceLine::new("A".to_string(), 1, 0.0);
    let b = InvoiceLine::new("A".to_string(), 1, -0.0);

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(hash_of(&a), hash_of(&InvoiceLine::new("A".to_string(), 2, 0.0)));
}
