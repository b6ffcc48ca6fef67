//! Field values held by a compact record

use crate::record::CompactRecord;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// Primitive kinds a field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Date,
    Time,
    Timestamp,
    TimestampWithTimezone,
}

impl ScalarKind {
    pub(crate) const ALL: [ScalarKind; 12] = [
        ScalarKind::Boolean,
        ScalarKind::Int8,
        ScalarKind::Int16,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::Float32,
        ScalarKind::Float64,
        ScalarKind::String,
        ScalarKind::Date,
        ScalarKind::Time,
        ScalarKind::Timestamp,
        ScalarKind::TimestampWithTimezone,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ScalarKind::Boolean => "boolean",
            ScalarKind::Int8 => "int8",
            ScalarKind::Int16 => "int16",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::String => "string",
            ScalarKind::Date => "date",
            ScalarKind::Time => "time",
            ScalarKind::Timestamp => "timestamp",
            ScalarKind::TimestampWithTimezone => "timestampWithTimezone",
        }
    }

    fn title(self) -> &'static str {
        match self {
            ScalarKind::Boolean => "Boolean",
            ScalarKind::Int8 => "Int8",
            ScalarKind::Int16 => "Int16",
            ScalarKind::Int32 => "Int32",
            ScalarKind::Int64 => "Int64",
            ScalarKind::Float32 => "Float32",
            ScalarKind::Float64 => "Float64",
            ScalarKind::String => "String",
            ScalarKind::Date => "Date",
            ScalarKind::Time => "Time",
            ScalarKind::Timestamp => "Timestamp",
            ScalarKind::TimestampWithTimezone => "TimestampWithTimezone",
        }
    }

    /// Wire tag, stable across versions.
    pub(crate) fn tag(self) -> u8 {
        match self {
            ScalarKind::Boolean => 0,
            ScalarKind::Int8 => 1,
            ScalarKind::Int16 => 2,
            ScalarKind::Int32 => 3,
            ScalarKind::Int64 => 4,
            ScalarKind::Float32 => 5,
            ScalarKind::Float64 => 6,
            ScalarKind::String => 7,
            ScalarKind::Date => 8,
            ScalarKind::Time => 9,
            ScalarKind::Timestamp => 10,
            ScalarKind::TimestampWithTimezone => 11,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

/// A single primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Date(Date),
    Time(Time),
    Timestamp(PrimitiveDateTime),
    TimestampWithTimezone(OffsetDateTime),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Boolean(_) => ScalarKind::Boolean,
            Scalar::Int8(_) => ScalarKind::Int8,
            Scalar::Int16(_) => ScalarKind::Int16,
            Scalar::Int32(_) => ScalarKind::Int32,
            Scalar::Int64(_) => ScalarKind::Int64,
            Scalar::Float32(_) => ScalarKind::Float32,
            Scalar::Float64(_) => ScalarKind::Float64,
            Scalar::String(_) => ScalarKind::String,
            Scalar::Date(_) => ScalarKind::Date,
            Scalar::Time(_) => ScalarKind::Time,
            Scalar::Timestamp(_) => ScalarKind::Timestamp,
            Scalar::TimestampWithTimezone(_) => ScalarKind::TimestampWithTimezone,
        }
    }
}

/// The value of one named field.
///
/// Array and nullable variants carry their element kind so that empty
/// arrays and absent values still describe their type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Value(Scalar),
    Nullable(ScalarKind, Option<Scalar>),
    Array(ScalarKind, Vec<Scalar>),
    ArrayOfNullable(ScalarKind, Vec<Option<Scalar>>),
    Compact(CompactRecord),
    ArrayOfCompact(Vec<CompactRecord>),
}

impl FieldValue {
    /// Schema-style type text, e.g. `nullableInt32[]`.
    pub fn describe(&self) -> String {
        match self {
            FieldValue::Value(scalar) => scalar.kind().keyword().to_string(),
            FieldValue::Nullable(kind, _) => format!("nullable{}", kind.title()),
            FieldValue::Array(kind, _) => format!("{}[]", kind.keyword()),
            FieldValue::ArrayOfNullable(kind, _) => format!("nullable{}[]", kind.title()),
            FieldValue::Compact(_) => "compact".to_string(),
            FieldValue::ArrayOfCompact(_) => "compact[]".to_string(),
        }
    }
}

/// Conversion between Rust values and [`Scalar`]s.
pub(crate) trait CompactPrimitive: Sized {
    const KIND: ScalarKind;

    fn into_scalar(self) -> Scalar;

    fn from_scalar(scalar: &Scalar) -> Option<Self>;
}

macro_rules! impl_compact_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl CompactPrimitive for $ty {
                const KIND: ScalarKind = ScalarKind::$variant;

                fn into_scalar(self) -> Scalar {
                    Scalar::$variant(self)
                }

                #[allow(clippy::clone_on_copy)]
                fn from_scalar(scalar: &Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::$variant(value) => Some(value.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_compact_primitive! {
    bool => Boolean,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Date => Date,
    Time => Time,
    PrimitiveDateTime => Timestamp,
    OffsetDateTime => TimestampWithTimezone,
}

#[cfg(test)]
#[path = "value/value_tests.rs"]
mod value_tests;
