//! Schema model: primitive kinds, field types, fields and type definitions
//!
//! The model is generic over the representation of a compact reference.
//! Declared schemas use the written name (`String`); the resolver produces
//! the same shapes over [`TypeId`](crate::TypeId) handles.
//!
//! # Field type text
//!
//! | Text | Field type |
//! |------|------------|
//! | `int32` | `Primitive(Int32)` |
//! | `nullableInt32` | `NullablePrimitive(Int32)` |
//! | `int32[]` | `Array(Primitive(Int32))` |
//! | `com.x.Foo` | `Compact("com.x.Foo")` |
//! | `Foo[]` | `Array(Compact("Foo"))` |

use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;

const NULLABLE_PREFIX: &str = "nullable";

/// Wire-level primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
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

impl PrimitiveKind {
    /// Every kind, fixed-size kinds first.
    pub const ALL: [PrimitiveKind; 12] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
        PrimitiveKind::String,
        PrimitiveKind::Date,
        PrimitiveKind::Time,
        PrimitiveKind::Timestamp,
        PrimitiveKind::TimestampWithTimezone,
    ];

    /// Schema keyword, e.g. `int32`.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
            PrimitiveKind::String => "string",
            PrimitiveKind::Date => "date",
            PrimitiveKind::Time => "time",
            PrimitiveKind::Timestamp => "timestamp",
            PrimitiveKind::TimestampWithTimezone => "timestampWithTimezone",
        }
    }

    /// Capitalized keyword, e.g. `Int32`. Used to build method names.
    pub fn title(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Int8 => "Int8",
            PrimitiveKind::Int16 => "Int16",
            PrimitiveKind::Int32 => "Int32",
            PrimitiveKind::Int64 => "Int64",
            PrimitiveKind::Float32 => "Float32",
            PrimitiveKind::Float64 => "Float64",
            PrimitiveKind::String => "String",
            PrimitiveKind::Date => "Date",
            PrimitiveKind::Time => "Time",
            PrimitiveKind::Timestamp => "Timestamp",
            PrimitiveKind::TimestampWithTimezone => "TimestampWithTimezone",
        }
    }

    /// Look up a kind by keyword, ignoring ASCII case.
    pub fn from_keyword(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(text))
    }

    /// Fixed-size kinds are the only ones that may carry a default.
    pub fn is_fixed_size(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Boolean
                | PrimitiveKind::Int8
                | PrimitiveKind::Int16
                | PrimitiveKind::Int32
                | PrimitiveKind::Int64
                | PrimitiveKind::Float32
                | PrimitiveKind::Float64
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The type of a field.
///
/// `R` is the representation of a compact reference: the written name
/// before resolution, a type handle after.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType<R = String> {
    Primitive(PrimitiveKind),
    NullablePrimitive(PrimitiveKind),
    /// Element type is never itself an array.
    Array(Box<FieldType<R>>),
    Compact(R),
}

/// Reasons a field type text cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRefError {
    Empty,
    NestedArray,
}

impl FieldType<String> {
    /// Parse field type text such as `nullableInt64` or `com.x.Foo[]`.
    ///
    /// Primitive keywords match case-insensitively. Anything that is not a
    /// primitive keyword is taken as a compact reference.
    pub fn parse(text: &str) -> Result<Self, TypeRefError> {
        let text = text.trim();
        match text.strip_suffix("[]") {
            Some(element) => {
                let element = element.trim_end();
                if element.ends_with("[]") {
                    return Err(TypeRefError::NestedArray);
                }
                Ok(FieldType::Array(Box::new(Self::parse_scalar(element)?)))
            }
            None => Self::parse_scalar(text),
        }
    }

    fn parse_scalar(text: &str) -> Result<Self, TypeRefError> {
        if text.is_empty() {
            return Err(TypeRefError::Empty);
        }
        if let Some(kind) = PrimitiveKind::from_keyword(text) {
            return Ok(FieldType::Primitive(kind));
        }
        if let Some(prefix) = text.get(..NULLABLE_PREFIX.len())
            && prefix.eq_ignore_ascii_case(NULLABLE_PREFIX)
            && let Some(kind) = PrimitiveKind::from_keyword(&text[NULLABLE_PREFIX.len()..])
        {
            return Ok(FieldType::NullablePrimitive(kind));
        }
        Ok(FieldType::Compact(text.to_string()))
    }
}

impl<R> FieldType<R> {
    pub fn is_array(&self) -> bool {
        matches!(self, FieldType::Array(_))
    }

    /// The element type of an array, or the type itself.
    pub fn element(&self) -> &FieldType<R> {
        match self {
            FieldType::Array(element) => element.as_ref(),
            other => other,
        }
    }

    /// The compact reference of `Compact(r)` or `Array(Compact(r))`.
    pub fn compact_ref(&self) -> Option<&R> {
        match self.element() {
            FieldType::Compact(reference) => Some(reference),
            _ => None,
        }
    }

    /// The primitive kind of a scalar (nullable or not) field type.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            FieldType::Primitive(kind) | FieldType::NullablePrimitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Rebuild the type with every compact reference mapped through `f`.
    pub fn try_map<S, E>(
        &self,
        f: &mut impl FnMut(&R) -> Result<S, E>,
    ) -> Result<FieldType<S>, E> {
        Ok(match self {
            FieldType::Primitive(kind) => FieldType::Primitive(*kind),
            FieldType::NullablePrimitive(kind) => FieldType::NullablePrimitive(*kind),
            FieldType::Array(element) => FieldType::Array(Box::new(element.try_map(f)?)),
            FieldType::Compact(reference) => FieldType::Compact(f(reference)?),
        })
    }
}

impl<R: fmt::Display> fmt::Display for FieldType<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Primitive(kind) => f.write_str(kind.keyword()),
            FieldType::NullablePrimitive(kind) => write!(f, "{NULLABLE_PREFIX}{}", kind.title()),
            FieldType::Array(element) => write!(f, "{element}[]"),
            FieldType::Compact(reference) => write!(f, "{reference}"),
        }
    }
}

/// A default literal as written in a schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Literal {
    fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(value) => Some(*value),
            Literal::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            Literal::Int(value) => Some(*value as f64),
            Literal::Float(value) => Some(*value),
            Literal::Text(text) => text.trim().parse().ok(),
            Literal::Bool(_) => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(value) => Some(*value),
            Literal::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "{value}"),
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Float(value) => write!(f, "{value}"),
            Literal::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// A default value checked against its fixed-size kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
}

impl DefaultValue {
    /// Convert a literal into a default of `kind`, checking range and finiteness.
    ///
    /// The error is a human-readable reason.
    pub fn from_literal(kind: PrimitiveKind, literal: &Literal) -> Result<Self, String> {
        let mismatch = || format!("{literal} is not a valid {kind} value");
        match kind {
            PrimitiveKind::Boolean => literal.as_bool().map(DefaultValue::Boolean).ok_or_else(mismatch),
            PrimitiveKind::Int8 => literal
                .as_int()
                .and_then(|v| i8::try_from(v).ok())
                .map(DefaultValue::Int8)
                .ok_or_else(mismatch),
            PrimitiveKind::Int16 => literal
                .as_int()
                .and_then(|v| i16::try_from(v).ok())
                .map(DefaultValue::Int16)
                .ok_or_else(mismatch),
            PrimitiveKind::Int32 => literal
                .as_int()
                .and_then(|v| i32::try_from(v).ok())
                .map(DefaultValue::Int32)
                .ok_or_else(mismatch),
            PrimitiveKind::Int64 => literal.as_int().map(DefaultValue::Int64).ok_or_else(mismatch),
            PrimitiveKind::Float32 => literal
                .as_float()
                .filter(|v| v.is_finite() && v.abs() <= f64::from(f32::MAX))
                .map(|v| DefaultValue::Float32(v as f32))
                .ok_or_else(mismatch),
            PrimitiveKind::Float64 => literal
                .as_float()
                .filter(|v| v.is_finite())
                .map(DefaultValue::Float64)
                .ok_or_else(mismatch),
            _ => Err(format!(
                "defaults are only allowed on fixed-size primitive fields, not {kind}"
            )),
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            DefaultValue::Boolean(_) => PrimitiveKind::Boolean,
            DefaultValue::Int8(_) => PrimitiveKind::Int8,
            DefaultValue::Int16(_) => PrimitiveKind::Int16,
            DefaultValue::Int32(_) => PrimitiveKind::Int32,
            DefaultValue::Int64(_) => PrimitiveKind::Int64,
            DefaultValue::Float32(_) => PrimitiveKind::Float32,
            DefaultValue::Float64(_) => PrimitiveKind::Float64,
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Boolean(v) => write!(f, "{v}"),
            DefaultValue::Int8(v) => write!(f, "{v}"),
            DefaultValue::Int16(v) => write!(f, "{v}"),
            DefaultValue::Int32(v) => write!(f, "{v}"),
            DefaultValue::Int64(v) => write!(f, "{v}"),
            DefaultValue::Float32(v) => write!(f, "{v:?}"),
            DefaultValue::Float64(v) => write!(f, "{v:?}"),
        }
    }
}

/// A named, typed field of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<R = String> {
    pub name: String,
    pub ty: FieldType<R>,
    pub default: Option<DefaultValue>,
    /// Forces the compact reference to resolve as an external type.
    pub external: bool,
}

impl<R> Field<R> {
    pub fn new(name: impl Into<String>, ty: FieldType<R>) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            external: false,
        }
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }
}

/// Namespace plus simple name, rendered as `namespace.Name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    namespace: Option<String>,
    name: String,
}

impl QualifiedName {
    /// An empty namespace is the same as no namespace.
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace
                .map(str::trim)
                .filter(|ns| !ns.is_empty())
                .map(str::to_string),
            name: name.into(),
        }
    }

    /// Split dotted text at its last dot.
    pub fn parse(text: &str) -> Self {
        match text.rsplit_once('.') {
            Some((namespace, name)) => Self::new(Some(namespace), name),
            None => Self::new(None, text),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Simple (unqualified) name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A record type: ordered fields under a qualified name.
///
/// External types have no fields and never get a compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef<R = String> {
    pub name: QualifiedName,
    pub fields: Vec<Field<R>>,
    pub external: bool,
}

impl<R> TypeDef<R> {
    pub fn new(name: QualifiedName, fields: Vec<Field<R>>) -> Self {
        Self {
            name,
            fields,
            external: false,
        }
    }

    pub fn external(name: QualifiedName) -> Self {
        Self {
            name,
            fields: Vec::new(),
            external: true,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field<R>> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn qualified_name(&self) -> String {
        self.name.to_string()
    }
}

/// Declared types in declaration order, keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    types: Vec<TypeDef>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from declarations, validating each one.
    pub fn from_types(types: impl IntoIterator<Item = TypeDef>) -> SchemaResult<Self> {
        let mut schema = Self::new();
        for def in types {
            schema.add_type(def)?;
        }
        Ok(schema)
    }

    /// Add a declaration.
    ///
    /// # Errors
    ///
    /// `DuplicateType`, `DuplicateField`, `NestedArray` or `InvalidDefault`.
    pub fn add_type(&mut self, def: TypeDef) -> SchemaResult<()> {
        let type_name = def.qualified_name();
        validate_fields(&type_name, &def.fields)?;

        match self.index.entry(type_name) {
            Entry::Occupied(slot) => Err(SchemaError::DuplicateType {
                type_name: slot.key().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(self.types.len());
                self.types.push(def);
                Ok(())
            }
        }
    }

    pub fn get(&self, qualified_name: &str) -> Option<&TypeDef> {
        self.position(qualified_name).map(|idx| &self.types[idx])
    }

    /// Declaration index of a type.
    pub fn position(&self, qualified_name: &str) -> Option<usize> {
        self.index.get(qualified_name).copied()
    }

    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn validate_fields(type_name: &str, fields: &[Field]) -> SchemaResult<()> {
    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                type_name: type_name.to_string(),
                field: field.name.clone(),
            });
        }
        if let FieldType::Array(element) = &field.ty
            && element.is_array()
        {
            return Err(SchemaError::NestedArray {
                type_name: type_name.to_string(),
                field: field.name.clone(),
                type_ref: field.ty.to_string(),
            });
        }
        if let Some(default) = &field.default {
            validate_default(type_name, field, default)?;
        }
    }
    Ok(())
}

fn validate_default(type_name: &str, field: &Field, default: &DefaultValue) -> SchemaResult<()> {
    let reason = match field.ty.primitive_kind() {
        Some(kind) if kind.is_fixed_size() && kind == default.kind() => return Ok(()),
        Some(kind) if kind.is_fixed_size() => {
            format!("a {} default does not fit a {kind} field", default.kind())
        }
        _ => format!(
            "defaults are only allowed on fixed-size primitive fields, not {}",
            field.ty
        ),
    };
    Err(SchemaError::InvalidDefault {
        type_name: type_name.to_string(),
        field: field.name.clone(),
        reason,
    })
}
