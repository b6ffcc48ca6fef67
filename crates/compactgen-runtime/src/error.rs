//! Error types for compact serialization

use thiserror::Error;

/// Result type alias for compact serialization
pub type CompactResult<T> = Result<T, CompactError>;

/// Error type for reading, writing and dispatching compact records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompactError {
    /// The record has no field with this name
    #[error("missing field {field} in record {type_name}")]
    MissingField { type_name: String, field: String },

    /// The field exists but holds a different kind of value
    #[error("field {field} in record {type_name} is {found}, expected {expected}")]
    FieldTypeMismatch {
        type_name: String,
        field: String,
        expected: String,
        found: String,
    },

    /// No serializer is registered for a record's type name
    #[error("no serializer registered for type name {0}")]
    UnknownTypeName(String),

    /// No serializer is registered for a Rust value type
    #[error("no serializer registered for {0}")]
    UnregisteredType(&'static str),

    /// A second serializer for an already registered type name
    #[error("a serializer for type name {0} is already registered")]
    DuplicateTypeName(String),

    /// A second serializer for an already registered Rust value type
    #[error("a serializer for {0} is already registered")]
    DuplicateValueType(&'static str),

    /// The registered serializer produces a different Rust type than requested
    #[error("record {type_name} does not deserialize to {expected}")]
    TypeMismatch {
        type_name: String,
        expected: &'static str,
    },

    /// Malformed binary input
    #[error("decode error: {0}")]
    Decode(String),
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
