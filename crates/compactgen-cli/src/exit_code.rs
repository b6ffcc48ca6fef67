//! Process exit codes

use compactgen_codegen::EmissionError;
use compactgen_core::SchemaError;

pub const OTHER: u8 = 1;
pub const SCHEMA: u8 = 2;
pub const EMISSION: u8 = 3;

/// Exit code for the first library error found in `err`'s chain.
///
/// Configuration problems count as bad input, not as emission failures.
pub fn for_error(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if cause.downcast_ref::<SchemaError>().is_some() {
            return SCHEMA;
        }
        if let Some(emission) = cause.downcast_ref::<EmissionError>() {
            return match emission {
                EmissionError::Config(_) | EmissionError::UnsupportedLanguage(_) => OTHER,
                EmissionError::WriteFailure { .. } | EmissionError::Render { .. } => EMISSION,
            };
        }
    }
    OTHER
}
