//! Typed field reader handed to [`CompactSerializer::read`](crate::CompactSerializer::read)

use crate::error::{CompactError, CompactResult};
use crate::record::CompactRecord;
use crate::registry::SerializerRegistry;
use crate::value::{CompactPrimitive, FieldValue};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// Reads fields of one record by name.
///
/// A field that is absent from the record fails with
/// [`CompactError::MissingField`] unless it is read through one of the
/// `_or` methods, which fall back to a default. A field present with another
/// shape or kind fails with [`CompactError::FieldTypeMismatch`].
pub struct CompactReader<'r> {
    registry: &'r SerializerRegistry,
    record: &'r CompactRecord,
}

impl<'r> CompactReader<'r> {
    pub(crate) fn new(registry: &'r SerializerRegistry, record: &'r CompactRecord) -> Self {
        Self { registry, record }
    }

    /// Type name of the record being read.
    pub fn type_name(&self) -> &str {
        self.record.type_name()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.record.contains(name)
    }

    fn field(&self, name: &str) -> CompactResult<&'r FieldValue> {
        self.record
            .get(name)
            .ok_or_else(|| CompactError::MissingField {
                type_name: self.record.type_name().to_string(),
                field: name.to_string(),
            })
    }

    fn mismatch(&self, name: &str, expected: String, found: &FieldValue) -> CompactError {
        CompactError::FieldTypeMismatch {
            type_name: self.record.type_name().to_string(),
            field: name.to_string(),
            expected,
            found: found.describe(),
        }
    }

    fn get<T: CompactPrimitive>(&self, name: &str) -> CompactResult<T> {
        let value = self.field(name)?;
        match value {
            FieldValue::Value(scalar) => T::from_scalar(scalar),
            _ => None,
        }
        .ok_or_else(|| self.mismatch(name, T::KIND.keyword().to_string(), value))
    }

    fn get_nullable<T: CompactPrimitive>(&self, name: &str) -> CompactResult<Option<T>> {
        let value = self.field(name)?;
        match value {
            FieldValue::Nullable(kind, scalar) if *kind == T::KIND => match scalar {
                Some(scalar) => T::from_scalar(scalar).map(Some),
                None => Some(None),
            },
            _ => None,
        }
        .ok_or_else(|| {
            let expected = FieldValue::Nullable(T::KIND, None).describe();
            self.mismatch(name, expected, value)
        })
    }

    fn get_array<T: CompactPrimitive>(&self, name: &str) -> CompactResult<Vec<T>> {
        let value = self.field(name)?;
        match value {
            FieldValue::Array(kind, items) if *kind == T::KIND => {
                items.iter().map(T::from_scalar).collect::<Option<Vec<T>>>()
            }
            _ => None,
        }
        .ok_or_else(|| {
            let expected = FieldValue::Array(T::KIND, Vec::new()).describe();
            self.mismatch(name, expected, value)
        })
    }

    fn get_array_of_nullable<T: CompactPrimitive>(
        &self,
        name: &str,
    ) -> CompactResult<Vec<Option<T>>> {
        let value = self.field(name)?;
        match value {
            FieldValue::ArrayOfNullable(kind, items) if *kind == T::KIND => items
                .iter()
                .map(|item| match item {
                    Some(scalar) => T::from_scalar(scalar).map(Some),
                    None => Some(None),
                })
                .collect::<Option<Vec<Option<T>>>>(),
            _ => None,
        }
        .ok_or_else(|| {
            let expected = FieldValue::ArrayOfNullable(T::KIND, Vec::new()).describe();
            self.mismatch(name, expected, value)
        })
    }

    fn get_or<T: CompactPrimitive>(&self, name: &str, default: T) -> CompactResult<T> {
        if self.record.contains(name) {
            self.get(name)
        } else {
            Ok(default)
        }
    }

    fn get_nullable_or<T: CompactPrimitive>(
        &self,
        name: &str,
        default: T,
    ) -> CompactResult<Option<T>> {
        if self.record.contains(name) {
            self.get_nullable(name)
        } else {
            Ok(Some(default))
        }
    }

    pub fn read_string(&self, name: &str) -> CompactResult<String> {
        self.get(name)
    }

    pub fn read_nullable_string(&self, name: &str) -> CompactResult<Option<String>> {
        self.get_nullable(name)
    }

    pub fn read_array_of_string(&self, name: &str) -> CompactResult<Vec<String>> {
        self.get_array(name)
    }

    pub fn read_array_of_nullable_string(&self, name: &str) -> CompactResult<Vec<Option<String>>> {
        self.get_array_of_nullable(name)
    }

    /// Reads a nested record, dispatching on its own type name.
    pub fn read_compact<T: 'static>(&self, name: &str) -> CompactResult<T> {
        match self.field(name)? {
            FieldValue::Compact(record) => self.registry.deserialize(record),
            other => Err(self.mismatch(name, "compact".to_string(), other)),
        }
    }

    pub fn read_array_of_compact<T: 'static>(&self, name: &str) -> CompactResult<Vec<T>> {
        match self.field(name)? {
            FieldValue::ArrayOfCompact(records) => records
                .iter()
                .map(|record| self.registry.deserialize(record))
                .collect(),
            other => Err(self.mismatch(name, "compact[]".to_string(), other)),
        }
    }
}

macro_rules! copy_readers {
    ($($ty:ty => $read:ident, $nullable:ident, $array:ident, $array_of_nullable:ident;)*) => {
        impl CompactReader<'_> {
            $(
                pub fn $read(&self, name: &str) -> CompactResult<$ty> {
                    self.get(name)
                }

                pub fn $nullable(&self, name: &str) -> CompactResult<Option<$ty>> {
                    self.get_nullable(name)
                }

                pub fn $array(&self, name: &str) -> CompactResult<Vec<$ty>> {
                    self.get_array(name)
                }

                pub fn $array_of_nullable(&self, name: &str) -> CompactResult<Vec<Option<$ty>>> {
                    self.get_array_of_nullable(name)
                }
            )*
        }
    };
}

copy_readers! {
    bool => read_boolean, read_nullable_boolean, read_array_of_boolean, read_array_of_nullable_boolean;
    i8 => read_int8, read_nullable_int8, read_array_of_int8, read_array_of_nullable_int8;
    i16 => read_int16, read_nullable_int16, read_array_of_int16, read_array_of_nullable_int16;
    i32 => read_int32, read_nullable_int32, read_array_of_int32, read_array_of_nullable_int32;
    i64 => read_int64, read_nullable_int64, read_array_of_int64, read_array_of_nullable_int64;
    f32 => read_float32, read_nullable_float32, read_array_of_float32, read_array_of_nullable_float32;
    f64 => read_float64, read_nullable_float64, read_array_of_float64, read_array_of_nullable_float64;
    Date => read_date, read_nullable_date, read_array_of_date, read_array_of_nullable_date;
    Time => read_time, read_nullable_time, read_array_of_time, read_array_of_nullable_time;
    PrimitiveDateTime => read_timestamp, read_nullable_timestamp, read_array_of_timestamp, read_array_of_nullable_timestamp;
    OffsetDateTime => read_timestamp_with_timezone, read_nullable_timestamp_with_timezone, read_array_of_timestamp_with_timezone, read_array_of_nullable_timestamp_with_timezone;
}

// Defaults apply when the field is absent, e.g. in records written by an
// older version of the type.
macro_rules! default_readers {
    ($($ty:ty => $read_or:ident, $nullable_or:ident;)*) => {
        impl CompactReader<'_> {
            $(
                pub fn $read_or(&self, name: &str, default: $ty) -> CompactResult<$ty> {
                    self.get_or(name, default)
                }

                pub fn $nullable_or(&self, name: &str, default: $ty) -> CompactResult<Option<$ty>> {
                    self.get_nullable_or(name, default)
                }
            )*
        }
    };
}

default_readers! {
    bool => read_boolean_or, read_nullable_boolean_or;
    i8 => read_int8_or, read_nullable_int8_or;
    i16 => read_int16_or, read_nullable_int16_or;
    i32 => read_int32_or, read_nullable_int32_or;
    i64 => read_int64_or, read_nullable_int64_or;
    f32 => read_float32_or, read_nullable_float32_or;
    f64 => read_float64_or, read_nullable_float64_or;
}
