//! compactgen-runtime - Runtime support for generated compact serializers
//!
//! Generated bindings depend on this crate only:
//! - [`CompactWriter`] / [`CompactReader`] for per-field access
//! - [`CompactSerializer`] implemented by every generated serializer
//! - [`SerializerRegistry`] for dispatch by fingerprint
//! - [`CompactRecord`] and its binary codec
//! - [`fmt`] and [`hash`] helpers used by generated `Display` and `Hash` impls

mod codec;
mod error;
pub mod fmt;
pub mod hash;
mod reader;
mod record;
mod registry;
mod serializer;
mod value;
mod writer;

pub use codec::{decode_record, encode_record};
pub use error::{CompactError, CompactResult};
pub use reader::CompactReader;
pub use record::CompactRecord;
pub use registry::SerializerRegistry;
pub use serializer::CompactSerializer;
pub use value::{FieldValue, Scalar, ScalarKind};
pub use writer::CompactWriter;

/// Date and time types used for `date`, `time`, `timestamp` and
/// `timestampWithTimezone` fields.
pub use time;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CompactError, CompactReader, CompactRecord, CompactResult, CompactSerializer,
        CompactWriter, SerializerRegistry,
    };
}
