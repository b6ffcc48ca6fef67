//! Typed field writer handed to [`CompactSerializer::write`](crate::CompactSerializer::write)

use crate::error::CompactResult;
use crate::record::CompactRecord;
use crate::registry::SerializerRegistry;
use crate::value::{CompactPrimitive, FieldValue};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// Builds one record, field by field.
///
/// Writing the same field name twice keeps the last value.
pub struct CompactWriter<'r> {
    registry: &'r SerializerRegistry,
    record: CompactRecord,
}

impl<'r> CompactWriter<'r> {
    pub(crate) fn new(registry: &'r SerializerRegistry, type_name: &str) -> Self {
        Self {
            registry,
            record: CompactRecord::new(type_name),
        }
    }

    pub(crate) fn finish(self) -> CompactRecord {
        self.record
    }

    /// Type name of the record being written.
    pub fn type_name(&self) -> &str {
        self.record.type_name()
    }

    fn put<T: CompactPrimitive>(&mut self, name: &str, value: T) {
        self.record
            .insert(name, FieldValue::Value(value.into_scalar()));
    }

    fn put_nullable<T: CompactPrimitive>(&mut self, name: &str, value: Option<T>) {
        self.record.insert(
            name,
            FieldValue::Nullable(T::KIND, value.map(T::into_scalar)),
        );
    }

    fn put_array<T: CompactPrimitive + Clone>(&mut self, name: &str, values: &[T]) {
        let items = values.iter().cloned().map(T::into_scalar).collect();
        self.record.insert(name, FieldValue::Array(T::KIND, items));
    }

    fn put_array_of_nullable<T: CompactPrimitive + Clone>(
        &mut self,
        name: &str,
        values: &[Option<T>],
    ) {
        let items = values
            .iter()
            .map(|value| value.clone().map(T::into_scalar))
            .collect();
        self.record
            .insert(name, FieldValue::ArrayOfNullable(T::KIND, items));
    }

    pub fn write_string(&mut self, name: &str, value: &str) {
        self.put(name, value.to_string());
    }

    pub fn write_nullable_string(&mut self, name: &str, value: Option<&str>) {
        self.put_nullable(name, value.map(str::to_string));
    }

    pub fn write_array_of_string(&mut self, name: &str, values: &[String]) {
        self.put_array(name, values);
    }

    pub fn write_array_of_nullable_string(&mut self, name: &str, values: &[Option<String>]) {
        self.put_array_of_nullable(name, values);
    }

    /// Writes a nested value with the serializer registered for `T`.
    ///
    /// # Errors
    ///
    /// Fails if `T` has no registered serializer or that serializer fails.
    pub fn write_compact<T: 'static>(&mut self, name: &str, value: &T) -> CompactResult<()> {
        let nested = self.registry.serialize(value)?;
        self.record.insert(name, FieldValue::Compact(nested));
        Ok(())
    }

    pub fn write_array_of_compact<T: 'static>(
        &mut self,
        name: &str,
        values: &[T],
    ) -> CompactResult<()> {
        let records = values
            .iter()
            .map(|value| self.registry.serialize(value))
            .collect::<CompactResult<Vec<_>>>()?;
        self.record.insert(name, FieldValue::ArrayOfCompact(records));
        Ok(())
    }
}

// Copy kinds take values by value; the shape is part of the method name.
macro_rules! copy_writers {
    ($($ty:ty => $write:ident, $nullable:ident, $array:ident, $array_of_nullable:ident;)*) => {
        impl CompactWriter<'_> {
            $(
                pub fn $write(&mut self, name: &str, value: $ty) {
                    self.put(name, value);
                }

                pub fn $nullable(&mut self, name: &str, value: Option<$ty>) {
                    self.put_nullable(name, value);
                }

                pub fn $array(&mut self, name: &str, values: &[$ty]) {
                    self.put_array(name, values);
                }

                pub fn $array_of_nullable(&mut self, name: &str, values: &[Option<$ty>]) {
                    self.put_array_of_nullable(name, values);
                }
            )*
        }
    };
}

copy_writers! {
    bool => write_boolean, write_nullable_boolean, write_array_of_boolean, write_array_of_nullable_boolean;
    i8 => write_int8, write_nullable_int8, write_array_of_int8, write_array_of_nullable_int8;
    i16 => write_int16, write_nullable_int16, write_array_of_int16, write_array_of_nullable_int16;
    i32 => write_int32, write_nullable_int32, write_array_of_int32, write_array_of_nullable_int32;
    i64 => write_int64, write_nullable_int64, write_array_of_int64, write_array_of_nullable_int64;
    f32 => write_float32, write_nullable_float32, write_array_of_float32, write_array_of_nullable_float32;
    f64 => write_float64, write_nullable_float64, write_array_of_float64, write_array_of_nullable_float64;
    Date => write_date, write_nullable_date, write_array_of_date, write_array_of_nullable_date;
    Time => write_time, write_nullable_time, write_array_of_time, write_array_of_nullable_time;
    PrimitiveDateTime => write_timestamp, write_nullable_timestamp, write_array_of_timestamp, write_array_of_nullable_timestamp;
    OffsetDateTime => write_timestamp_with_timezone, write_nullable_timestamp_with_timezone, write_array_of_timestamp_with_timezone, write_array_of_nullable_timestamp_with_timezone;
}

#[cfg(test)]
#[path = "writer/writer_tests.rs"]
mod writer_tests;
