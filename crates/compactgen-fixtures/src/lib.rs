//! compactgen-fixtures - Generated Rust bindings for the example schemas
//!
//! `build.rs` runs the Rust backend over `schema/shapes.yaml` (which imports
//! `schema/common.yaml`). The output is compiled here so tests can exercise
//! generated code against the runtime:
//! - [`generated`] holds one module per schema type plus `registry`
//! - [`external`] provides the hand-written `Money` type the schema references
//! - [`registry`] builds a registry holding every serializer

use compactgen_runtime::{CompactResult, SerializerRegistry};

pub mod external;

/// Modules generated from the example schemas.
pub mod generated {
    include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
}

pub use generated::registry::register_all;

/// A registry with the external `Money` serializer and every generated one.
pub fn registry() -> CompactResult<SerializerRegistry> {
    let mut registry = SerializerRegistry::new();
    registry.register(external::MoneySerializer)?;
    register_all(&mut registry)?;
    Ok(registry)
}
