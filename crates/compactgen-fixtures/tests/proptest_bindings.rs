//! Property-based round-trip tests for the generated bindings

use compactgen_fixtures::external::Money;
use compactgen_fixtures::generated::address::Address;
use compactgen_fixtures::generated::customer::Customer;
use compactgen_fixtures::generated::invoice::Invoice;
use compactgen_fixtures::generated::invoice_line::InvoiceLine;
use compactgen_fixtures::generated::nullables::Nullables;
use compactgen_fixtures::generated::scalars::Scalars;
use compactgen_fixtures::generated::versioned::Versioned;
use compactgen_fixtures::registry;
use compactgen_runtime::SerializerRegistry;
use proptest::prelude::*;
use std::fmt::Debug;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

fn arb_date() -> impl Strategy<Value = Date> {
    // Julian day 2_451_545 is 2000-01-01
    (2_451_545 - 100_000..2_451_545 + 100_000).prop_map(|day| Date::from_julian_day(day).unwrap())
}

fn arb_time() -> impl Strategy<Value = Time> {
    (0u8..24, 0u8..60, 0u8..60, 0u32..1_000_000_000)
        .prop_map(|(h, m, s, nanos)| Time::from_hms_nano(h, m, s, nanos).unwrap())
}

fn arb_timestamp() -> impl Strategy<Value = PrimitiveDateTime> {
    (arb_date(), arb_time()).prop_map(|(date, time)| PrimitiveDateTime::new(date, time))
}

fn arb_zoned() -> impl Strategy<Value = OffsetDateTime> {
    (arb_timestamp(), -64_800i32..=64_800).prop_map(|(stamp, seconds)| {
        stamp.assume_offset(UtcOffset::from_whole_seconds(seconds).unwrap())
    })
}

// NaN never compares equal, so keep floats finite
fn arb_f32() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6
}

fn arb_f64() -> impl Strategy<Value = f64> {
    -1.0e12f64..1.0e12
}

fn arb_scalars() -> impl Strategy<Value = Scalars> {
    (
        any::<bool>(),
        any::<i8>(),
        any::<i16>(),
        any::<i32>(),
        any::<i64>(),
        arb_f32(),
        arb_f64(),
        "[a-zA-Z0-9 éü]{0,12}",
        arb_date(),
        arb_time(),
        arb_timestamp(),
        arb_zoned(),
    )
        .prop_map(
            |(flag, tiny, small, medium, large, single, double, text, day, clock, stamp, zoned)| {
                Scalars::new(
                    flag, tiny, small, medium, large, single, double, text, day, clock, stamp,
                    zoned,
                )
            },
        )
}

fn arb_nullables() -> impl Strategy<Value = Nullables> {
    use prop::option::of;
    (
        of(any::<bool>()),
        of(any::<i8>()),
        of(any::<i16>()),
        of(any::<i32>()),
        of(any::<i64>()),
        of(arb_f32()),
        of(arb_f64()),
        of("[a-z]{0,8}"),
        of(arb_date()),
        of(arb_time()),
        of(arb_timestamp()),
        of(arb_zoned()),
    )
        .prop_map(
            |(flag, tiny, small, medium, large, single, double, text, day, clock, stamp, zoned)| {
                Nullables::new(
                    flag, tiny, small, medium, large, single, double, text, day, clock, stamp,
                    zoned,
                )
            },
        )
}

fn arb_invoice() -> impl Strategy<Value = Invoice> {
    let address = ("[a-z ]{0,12}", "[a-z]{0,8}", prop::option::of("[0-9]{5}"))
        .prop_map(|(street, city, zip)| Address::new(street, city, zip));
    let customer = ("[A-Za-z]{1,8}", address, prop::collection::vec("[a-z]{1,4}", 0..4))
        .prop_map(|(name, address, tags)| Customer::new(name, address, tags));
    let line = ("[A-Z]-[0-9]{1,3}", any::<i32>(), arb_f64())
        .prop_map(|(sku, quantity, price)| InvoiceLine::new(sku, quantity, price));
    let money = ("[A-Z]{3}", any::<i64>()).prop_map(|(currency, cents)| Money::new(currency, cents));

    (
        "INV-[0-9]{1,6}",
        customer,
        money,
        prop::collection::vec(line, 0..5),
        arb_date(),
        prop::option::of("[a-z ]{0,16}"),
    )
        .prop_map(|(number, customer, total, lines, issued, note)| {
            Invoice::new(number, customer, total, lines, issued, note)
        })
}

fn round_trip<T: 'static + PartialEq + Debug>(registry: &SerializerRegistry, value: &T) -> T {
    let bytes = registry.to_bytes(value).unwrap();
    registry.from_bytes(&bytes).unwrap()
}

proptest! {
    #[test]
    fn scalars_round_trip(value in arb_scalars()) {
        let registry = registry().unwrap();
        prop_assert_eq!(round_trip(&registry, &value), value);
    }

    #[test]
    fn nullables_round_trip(value in arb_nullables()) {
        let registry = registry().unwrap();
        prop_assert_eq!(round_trip(&registry, &value), value);
    }

    #[test]
    fn invoices_round_trip(value in arb_invoice()) {
        let registry = registry().unwrap();
        prop_assert_eq!(round_trip(&registry, &value), value);
    }

    #[test]
    fn versioned_round_trip(
        id in any::<i32>(),
        mboolean in any::<bool>(),
        mbyte in any::<i8>(),
        mshort in any::<i16>(),
        mint in any::<i32>(),
        mlong in any::<i64>(),
        mfloat in arb_f32(),
        mdouble in arb_f64(),
        level in prop::option::of(any::<i16>()),
    ) {
        let registry = registry().unwrap();
        let value = Versioned::new(id, mboolean, mbyte, mshort, mint, mlong, mfloat, mdouble, level);
        prop_assert_eq!(round_trip(&registry, &value), value);
    }

    #[test]
    fn display_is_stable_across_round_trip(value in arb_invoice()) {
        let registry = registry().unwrap();
        prop_assert_eq!(round_trip(&registry, &value).to_string(), value.to_string());
    }
}
