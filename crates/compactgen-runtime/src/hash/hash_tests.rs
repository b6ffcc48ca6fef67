#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(0.0, 0 ; "positive zero")]
#[test_case(-0.0, 0 ; "negative zero")]
#[test_case(1.5, 1.5f32.to_bits() ; "non zero")]
fn float32_bits___value___maps_zeros_together(value: f32, expected: u32) {
    assert_eq!(float32_bits(value), expected);
}

#[test_case(0.0, 0 ; "positive zero")]
#[test_case(-0.0, 0 ; "negative zero")]
#[test_case(-2.25, (-2.25f64).to_bits() ; "non zero")]
fn float64_bits___value___maps_zeros_together(value: f64, expected: u64) {
    assert_eq!(float64_bits(value), expected);
}

#[test]
fn float64_bits___nan___keeps_its_bits() {
    assert_eq!(float64_bits(f64::NAN), f64::NAN.to_bits());
}
