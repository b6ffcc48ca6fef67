//! Float hashing helpers used by generated `Hash` impls
//!
//! Both zeros hash alike, so `0.0` and `-0.0` produce the same hash.

/// Bit pattern of `value`, with `-0.0` mapped to `0`.
pub fn float32_bits(value: f32) -> u32 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

/// Bit pattern of `value`, with `-0.0` mapped to `0`.
pub fn float64_bits(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

#[cfg(test)]
#[path = "hash/hash_tests.rs"]
mod hash_tests;
