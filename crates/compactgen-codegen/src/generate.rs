//! Language dispatch: render every unit, then write them in one pass

use crate::config::{GeneratorConfig, Language};
use crate::error::EmissionResult;
use crate::hint::{HintSection, java_hints, rust_hints};
use crate::java::generate_java;
use crate::output::{GeneratedUnit, WriteReport, write_units};
use crate::rust::generate_rust;
use compactgen_core::CompiledSchema;
use std::path::Path;
use tracing::debug;

/// Render all units for `language` without touching the filesystem.
pub fn render(
    compiled: &CompiledSchema,
    language: Language,
    config: &GeneratorConfig,
) -> EmissionResult<Vec<GeneratedUnit>> {
    match language {
        Language::Java => generate_java(compiled),
        Language::Rust => generate_rust(compiled, &config.rust),
    }
}

/// Registration hints for `language`, or none when disabled.
pub fn hints(
    compiled: &CompiledSchema,
    language: Language,
    config: &GeneratorConfig,
) -> Vec<HintSection> {
    match language {
        Language::Java if config.java.hints => java_hints(compiled),
        Language::Java => Vec::new(),
        Language::Rust => rust_hints(compiled, &config.rust),
    }
}

/// Render and write all units under `output_dir`.
///
/// Rendering finishes before the first write, so a type that cannot be
/// rendered leaves the output directory untouched.
pub fn generate(
    compiled: &CompiledSchema,
    language: Language,
    config: &GeneratorConfig,
    output_dir: &Path,
) -> EmissionResult<WriteReport> {
    let units = render(compiled, language, config)?;
    debug!(language = %language, units = units.len(), "rendered all units");
    write_units(output_dir, &units)
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
