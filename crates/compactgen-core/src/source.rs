//! Schema documents: YAML/JSON parsing, namespaces and imports
//!
//! ```yaml
//! namespace: com.example
//! imports:
//!   - common.yaml
//! classes:
//!   - name: Example1
//!     fields:
//!       - name: example
//!         type: Example2
//!       - name: id
//!         type: int64
//!         default: 7
//! ```
//!
//! Imports are resolved relative to the importing file and followed
//! transitively. A file that was already loaded is skipped, so import
//! cycles terminate. Types are declared in load order: the root document
//! first, then each import depth-first.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{
    DefaultValue, Field, FieldType, Literal, QualifiedName, Schema, TypeDef, TypeRefError,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Schema document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    #[default]
    Yaml,
    Json,
}

impl SourceFormat {
    /// `.json` files are JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
            _ => SourceFormat::Yaml,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDocument {
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    imports: Vec<String>,
    classes: Vec<ClassDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassDocument {
    name: String,
    #[serde(default)]
    fields: Vec<FieldDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDocument {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    default: Option<Literal>,
    #[serde(default)]
    external: bool,
}

/// Load a schema file and everything it imports.
pub fn load_schema(path: &Path) -> SchemaResult<Schema> {
    let mut loader = Loader::default();
    loader.load_file(path)?;
    debug!(types = loader.schema.len(), root = %path.display(), "loaded schema");
    Ok(loader.schema)
}

/// Parse an in-memory schema document.
///
/// Imports resolve against `base_dir`.
pub fn parse_schema(text: &str, format: SourceFormat, base_dir: &Path) -> SchemaResult<Schema> {
    let mut loader = Loader::default();
    let document = parse_document(text, format, "<inline>")?;
    loader.load_document(document, "<inline>", base_dir)?;
    Ok(loader.schema)
}

#[derive(Default)]
struct Loader {
    schema: Schema,
    visited: HashSet<PathBuf>,
}

impl Loader {
    fn load_file(&mut self, path: &Path) -> SchemaResult<()> {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if !self.visited.insert(key) {
            debug!(path = %path.display(), "skipping already imported schema");
            return Ok(());
        }

        let text = fs::read_to_string(path).map_err(|source| SchemaError::ImportFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let origin = path.display().to_string();
        let document = parse_document(&text, SourceFormat::from_path(path), &origin)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        self.load_document(document, &origin, base_dir)
    }

    fn load_document(
        &mut self,
        document: SchemaDocument,
        origin: &str,
        base_dir: &Path,
    ) -> SchemaResult<()> {
        let namespace = document.namespace.as_deref();
        for class in document.classes {
            let def = build_type(namespace, class, origin)?;
            debug!(type_name = %def.name, origin, "declared type");
            self.schema.add_type(def)?;
        }
        for import in &document.imports {
            self.load_file(&base_dir.join(import))?;
        }
        Ok(())
    }
}

fn parse_document(text: &str, format: SourceFormat, origin: &str) -> SchemaResult<SchemaDocument> {
    let parsed = match format {
        SourceFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        SourceFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| SchemaError::MalformedSchema {
        origin: origin.to_string(),
        reason,
    })
}

fn build_type(namespace: Option<&str>, class: ClassDocument, origin: &str) -> SchemaResult<TypeDef> {
    let name = class.name.trim();
    if name.is_empty() {
        return Err(SchemaError::MalformedSchema {
            origin: origin.to_string(),
            reason: "class with an empty name".to_string(),
        });
    }
    let qualified = QualifiedName::new(namespace, name);
    let type_name = qualified.to_string();

    let fields = class
        .fields
        .into_iter()
        .map(|field| build_field(&type_name, field, origin))
        .collect::<SchemaResult<Vec<_>>>()?;

    Ok(TypeDef::new(qualified, fields))
}

fn build_field(type_name: &str, doc: FieldDocument, origin: &str) -> SchemaResult<Field> {
    let ty = FieldType::parse(&doc.ty).map_err(|err| match err {
        TypeRefError::NestedArray => SchemaError::NestedArray {
            type_name: type_name.to_string(),
            field: doc.name.clone(),
            type_ref: doc.ty.clone(),
        },
        TypeRefError::Empty => SchemaError::MalformedSchema {
            origin: origin.to_string(),
            reason: format!("field {type_name}.{} has an empty type", doc.name),
        },
    })?;

    let mut field = Field::new(doc.name, ty).with_external(doc.external);
    if let Some(literal) = &doc.default {
        field.default = Some(convert_default(type_name, &field, literal)?);
    }
    Ok(field)
}

fn convert_default(type_name: &str, field: &Field, literal: &Literal) -> SchemaResult<DefaultValue> {
    let invalid = |reason: String| SchemaError::InvalidDefault {
        type_name: type_name.to_string(),
        field: field.name.clone(),
        reason,
    };
    match field.ty.primitive_kind() {
        Some(kind) => DefaultValue::from_literal(kind, literal).map_err(invalid),
        None => Err(invalid(format!(
            "defaults are only allowed on fixed-size primitive fields, not {}",
            field.ty
        ))),
    }
}
