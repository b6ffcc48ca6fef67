//! JVM type mappings for Java code generation.
//!
//! # Type Mappings
//!
//! | Kind | Java | Java (nullable) | Import |
//! |------|------|-----------------|--------|
//! | `boolean` | `boolean` | `Boolean` | |
//! | `int8` | `byte` | `Byte` | |
//! | `int16` | `short` | `Short` | |
//! | `int32` | `int` | `Integer` | |
//! | `int64` | `long` | `Long` | |
//! | `float32` | `float` | `Float` | |
//! | `float64` | `double` | `Double` | |
//! | `string` | `String` | `String` | |
//! | `date` | `LocalDate` | `LocalDate` | `java.time.LocalDate` |
//! | `time` | `LocalTime` | `LocalTime` | `java.time.LocalTime` |
//! | `timestamp` | `LocalDateTime` | `LocalDateTime` | `java.time.LocalDateTime` |
//! | `timestampWithTimezone` | `OffsetDateTime` | `OffsetDateTime` | `java.time.OffsetDateTime` |

use compactgen_core::PrimitiveKind;

/// Represents a JVM type with both primitive and boxed forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JvmType {
    /// The primitive type name (e.g., "int", "boolean") or reference type name.
    pub primitive: &'static str,
    /// The boxed/nullable type name (e.g., "Integer", "Boolean").
    pub boxed: &'static str,
    /// Whether this type is a primitive.
    pub is_primitive: bool,
    /// Fully qualified name to import, for types outside `java.lang`.
    pub import: Option<&'static str>,
}

impl JvmType {
    /// Create a reference type, whose nullable form is itself.
    pub fn reference(name: &'static str, import: Option<&'static str>) -> Self {
        Self {
            primitive: name,
            boxed: name,
            is_primitive: false,
            import,
        }
    }

    /// Create a JVM primitive type.
    pub fn primitive(primitive: &'static str, boxed: &'static str) -> Self {
        Self {
            primitive,
            boxed,
            is_primitive: true,
            import: None,
        }
    }

    /// Get the appropriate Java type string.
    ///
    /// Nullable fields use the boxed type to allow null.
    pub fn java_type(&self, nullable: bool) -> &'static str {
        if nullable && self.is_primitive {
            self.boxed
        } else {
            self.primitive
        }
    }
}

/// Map a primitive kind to a JVM type.
pub fn map_kind(kind: PrimitiveKind) -> JvmType {
    match kind {
        PrimitiveKind::Boolean => JvmType::primitive("boolean", "Boolean"),
        PrimitiveKind::Int8 => JvmType::primitive("byte", "Byte"),
        PrimitiveKind::Int16 => JvmType::primitive("short", "Short"),
        PrimitiveKind::Int32 => JvmType::primitive("int", "Integer"),
        PrimitiveKind::Int64 => JvmType::primitive("long", "Long"),
        PrimitiveKind::Float32 => JvmType::primitive("float", "Float"),
        PrimitiveKind::Float64 => JvmType::primitive("double", "Double"),
        PrimitiveKind::String => JvmType::reference("String", None),
        PrimitiveKind::Date => JvmType::reference("LocalDate", Some("java.time.LocalDate")),
        PrimitiveKind::Time => JvmType::reference("LocalTime", Some("java.time.LocalTime")),
        PrimitiveKind::Timestamp => {
            JvmType::reference("LocalDateTime", Some("java.time.LocalDateTime"))
        }
        PrimitiveKind::TimestampWithTimezone => {
            JvmType::reference("OffsetDateTime", Some("java.time.OffsetDateTime"))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn jvm_type___reference___same_primitive_and_boxed() {
        let ty = JvmType::reference("String", None);

        assert_eq!(ty.primitive, "String");
        assert_eq!(ty.boxed, "String");
        assert!(!ty.is_primitive);
    }

    #[test]
    fn jvm_type___java_type___nullable_uses_boxed() {
        let ty = JvmType::primitive("int", "Integer");

        assert_eq!(ty.java_type(false), "int");
        assert_eq!(ty.java_type(true), "Integer");
    }

    #[test]
    fn jvm_type___java_type___reference_same_for_both() {
        let ty = map_kind(PrimitiveKind::Date);

        assert_eq!(ty.java_type(false), "LocalDate");
        assert_eq!(ty.java_type(true), "LocalDate");
    }

    #[test]
    fn map_kind___fixed_size_kinds_are_primitive() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(map_kind(kind).is_primitive, kind.is_fixed_size(), "{kind}");
        }
    }

    #[test]
    fn map_kind___time_kinds_need_imports() {
        assert_eq!(
            map_kind(PrimitiveKind::TimestampWithTimezone).import,
            Some("java.time.OffsetDateTime")
        );
        assert_eq!(map_kind(PrimitiveKind::String).import, None);
        assert_eq!(map_kind(PrimitiveKind::Int8).java_type(true), "Byte");
    }
}
