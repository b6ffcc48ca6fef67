//! Serializer registry: dispatch by type name and by Rust type

use crate::error::{CompactError, CompactResult};
use crate::reader::CompactReader;
use crate::record::CompactRecord;
use crate::serializer::CompactSerializer;
use crate::writer::CompactWriter;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

trait ErasedSerializer: Send + Sync {
    fn write_erased(&self, writer: &mut CompactWriter<'_>, value: &dyn Any) -> CompactResult<()>;

    fn read_erased(&self, reader: &CompactReader<'_>) -> CompactResult<Box<dyn Any>>;
}

impl<S: CompactSerializer> ErasedSerializer for S {
    fn write_erased(&self, writer: &mut CompactWriter<'_>, value: &dyn Any) -> CompactResult<()> {
        let value = value
            .downcast_ref::<S::Value>()
            .ok_or_else(|| CompactError::TypeMismatch {
                type_name: self.type_name().to_string(),
                expected: type_name::<S::Value>(),
            })?;
        self.write(writer, value)
    }

    fn read_erased(&self, reader: &CompactReader<'_>) -> CompactResult<Box<dyn Any>> {
        Ok(Box::new(self.read(reader)?))
    }
}

/// Serializers keyed by type name, with an index from Rust type to type name.
///
/// Populated once at program start, then shared read-only.
#[derive(Default)]
pub struct SerializerRegistry {
    by_name: HashMap<String, Box<dyn ErasedSerializer>>,
    by_type: HashMap<TypeId, String>,
}

impl SerializerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a serializer.
    ///
    /// # Errors
    ///
    /// Returns an error if its type name or its value type is already registered.
    pub fn register<S: CompactSerializer>(&mut self, serializer: S) -> CompactResult<()> {
        let value_type = TypeId::of::<S::Value>();
        if self.by_type.contains_key(&value_type) {
            return Err(CompactError::DuplicateValueType(type_name::<S::Value>()));
        }

        let name = serializer.type_name().to_string();
        match self.by_name.entry(name.clone()) {
            Entry::Occupied(_) => Err(CompactError::DuplicateTypeName(name)),
            Entry::Vacant(slot) => {
                debug!(type_name = %name, value_type = type_name::<S::Value>(), "registered serializer");
                slot.insert(Box::new(serializer));
                self.by_type.insert(value_type, name);
                Ok(())
            }
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.by_name.contains_key(type_name)
    }

    /// Type name registered for the Rust type `T`.
    pub fn type_name_of<T: 'static>(&self) -> Option<&str> {
        self.by_type.get(&TypeId::of::<T>()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Writes `value` into a new record using the serializer registered for `T`.
    pub fn serialize<T: 'static>(&self, value: &T) -> CompactResult<CompactRecord> {
        let name = self
            .type_name_of::<T>()
            .ok_or(CompactError::UnregisteredType(type_name::<T>()))?;
        let serializer = self
            .by_name
            .get(name)
            .ok_or_else(|| CompactError::UnknownTypeName(name.to_string()))?;

        let mut writer = CompactWriter::new(self, name);
        serializer.write_erased(&mut writer, value)?;
        Ok(writer.finish())
    }

    /// Reads a record with the serializer registered for its type name.
    pub fn deserialize_any(&self, record: &CompactRecord) -> CompactResult<Box<dyn Any>> {
        let serializer = self
            .by_name
            .get(record.type_name())
            .ok_or_else(|| CompactError::UnknownTypeName(record.type_name().to_string()))?;
        serializer.read_erased(&CompactReader::new(self, record))
    }

    /// Reads a record and checks that it produces a `T`.
    pub fn deserialize<T: 'static>(&self, record: &CompactRecord) -> CompactResult<T> {
        self.deserialize_any(record)?
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| CompactError::TypeMismatch {
                type_name: record.type_name().to_string(),
                expected: type_name::<T>(),
            })
    }

    pub fn to_bytes<T: 'static>(&self, value: &T) -> CompactResult<Vec<u8>> {
        Ok(self.serialize(value)?.to_bytes())
    }

    pub fn from_bytes<T: 'static>(&self, bytes: &[u8]) -> CompactResult<T> {
        self.deserialize(&CompactRecord::from_bytes(bytes)?)
    }
}

impl std::fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("SerializerRegistry")
            .field("type_names", &names)
            .finish()
    }
}
