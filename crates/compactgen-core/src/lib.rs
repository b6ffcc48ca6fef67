//! compactgen-core - Schema model, resolution, ordering and type identity
//!
//! This crate turns a schema of compact record types into a validated,
//! resolved and ordered type graph that code emitters can consume:
//! - [`Schema`] holds the declared types in declaration order
//! - [`load_schema`] reads YAML/JSON schema files and follows imports
//! - [`resolve`] binds every field reference to a type handle
//! - [`emission_order`] orders types so dependencies come first
//! - [`assign_identities`] computes a stable fingerprint per type
//! - [`CompiledSchema`] runs all of the above in one call

mod error;
pub mod identity;
pub mod order;
pub mod pipeline;
pub mod resolve;
pub mod schema;
pub mod source;

pub use error::{SchemaError, SchemaResult};
pub use identity::{Fingerprint, TypeIdentity, assign_identities, fingerprint, signature};
pub use order::emission_order;
pub use pipeline::CompiledSchema;
pub use resolve::{ResolvedField, ResolvedSchema, ResolvedType, TypeId, resolve};
pub use schema::{
    DefaultValue, Field, FieldType, Literal, PrimitiveKind, QualifiedName, Schema, TypeDef,
};
pub use source::{SourceFormat, load_schema, parse_schema};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CompiledSchema, DefaultValue, Field, FieldType, Fingerprint, PrimitiveKind,
        QualifiedName, ResolvedSchema, Schema, SchemaError, SchemaResult, TypeDef, TypeId,
    };
}
