//! compactgen-codegen - Java and Rust code emitters for compact schemas
//!
//! This crate turns a [`CompiledSchema`](compactgen_core::CompiledSchema)
//! into source files:
//! - [`generate_java`] renders one class per type with a nested serializer
//! - [`generate_rust`] renders one module per type plus a registry module
//! - [`write_units`] writes rendered files atomically and idempotently
//! - [`GeneratorConfig`] holds the `compactgen.toml` settings
//! - [`java_hints`] / [`rust_hints`] describe how to register the serializers

mod config;
mod error;
mod generate;
mod hint;
mod java;
mod jvm_types;
pub mod naming;
mod output;
mod rust;

pub use config::{GeneratorConfig, GeneratorSection, JavaConfig, Language, RustConfig};
pub use error::{EmissionError, EmissionResult};
pub use generate::{generate, hints, render};
pub use hint::{HintSection, java_hints, rust_hints};
pub use java::{generate_java, java_path};
pub use output::{GeneratedUnit, WriteReport, write_units};
pub use rust::{GENERATED_HEADER, generate_rust};
