//! Error types for schema loading, resolution and identity assignment

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error type for every stage between the schema source and emission.
///
/// Each variant names the offending type (and field, where there is one)
/// by its qualified name. All of them are fatal for the whole run.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Two declarations share a qualified name
    #[error("duplicate type: {type_name}")]
    DuplicateType { type_name: String },

    /// Two fields of one type share a name
    #[error("duplicate field {field} in type {type_name}")]
    DuplicateField { type_name: String, field: String },

    /// A default literal on a field that cannot carry it
    #[error("invalid default for field {type_name}.{field}: {reason}")]
    InvalidDefault {
        type_name: String,
        field: String,
        reason: String,
    },

    /// An array whose element type is itself an array
    #[error("nested array type {type_ref} in field {type_name}.{field}")]
    NestedArray {
        type_name: String,
        field: String,
        type_ref: String,
    },

    /// An undotted name matching more than one declared type
    #[error(
        "ambiguous reference {reference} in field {type_name}.{field}; candidates: {}",
        .candidates.join(", ")
    )]
    AmbiguousReference {
        type_name: String,
        field: String,
        reference: String,
        candidates: Vec<String>,
    },

    /// Compact references forming a cycle
    #[error("cyclic type dependency: {}", .path.join(" -> "))]
    CyclicTypeDependency { path: Vec<String> },

    /// A name that is neither a primitive, a declared type, nor external
    #[error("unresolved reference {reference} in field {type_name}.{field}")]
    UnresolvedReference {
        type_name: String,
        field: String,
        reference: String,
    },

    /// Two types hashing to the same fingerprint
    #[error("fingerprint collision between {first} and {second}: {fingerprint}")]
    FingerprintCollision {
        first: String,
        second: String,
        fingerprint: String,
    },

    /// A schema document that does not have the expected shape
    #[error("malformed schema {origin}: {reason}")]
    MalformedSchema { origin: String, reason: String },

    /// A schema file (the root document or an import) that cannot be read
    #[error("failed to read schema file {}: {source}", .path.display())]
    ImportFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    /// Qualified name of the type the error is about, when there is one.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            SchemaError::DuplicateType { type_name }
            | SchemaError::DuplicateField { type_name, .. }
            | SchemaError::InvalidDefault { type_name, .. }
            | SchemaError::NestedArray { type_name, .. }
            | SchemaError::AmbiguousReference { type_name, .. }
            | SchemaError::UnresolvedReference { type_name, .. } => Some(type_name),
            SchemaError::CyclicTypeDependency { path } => path.first().map(String::as_str),
            SchemaError::FingerprintCollision { second, .. } => Some(second),
            SchemaError::MalformedSchema { .. } | SchemaError::ImportFailed { .. } => None,
        }
    }
}
