//! Type resolution: binding field references to type handles
//!
//! A compact reference is resolved in this order:
//!
//! 1. field marked `external` → external type
//! 2. exact qualified name of a declared type
//! 3. `<owner namespace>.<name>` for an undotted name
//! 4. unique simple-name match (two or more matches are ambiguous)
//! 5. dotted name not declared anywhere → external type
//! 6. otherwise unresolved
//!
//! External types are materialized once per name and shared by every
//! reference to that name.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{Field, QualifiedName, Schema, TypeDef};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Handle of a type in a [`ResolvedSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type ResolvedField = Field<TypeId>;
pub type ResolvedType = TypeDef<TypeId>;

/// Declared and external types with every reference bound.
///
/// Declared types occupy the first slots in declaration order; external
/// types follow in order of first reference.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    types: Vec<ResolvedType>,
    declared: usize,
    dependencies: Vec<Vec<TypeId>>,
    index: HashMap<String, TypeId>,
}

impl ResolvedSchema {
    pub fn get(&self, id: TypeId) -> &ResolvedType {
        &self.types[id.0]
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<TypeId> {
        self.index.get(qualified_name).copied()
    }

    /// Every type, declared first.
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &ResolvedType)> {
        self.types.iter().enumerate().map(|(idx, def)| (TypeId(idx), def))
    }

    /// Declared types in declaration order.
    pub fn declared(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.declared).map(TypeId)
    }

    /// External types in order of first reference.
    pub fn externals(&self) -> impl Iterator<Item = TypeId> + '_ {
        (self.declared..self.types.len()).map(TypeId)
    }

    /// Non-external types referenced by `id`'s fields, in field order, without repeats.
    pub fn dependencies(&self, id: TypeId) -> &[TypeId] {
        &self.dependencies[id.0]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Resolve every field reference of `schema`.
///
/// # Errors
///
/// `AmbiguousReference` or `UnresolvedReference`, naming the first field
/// that fails.
pub fn resolve(schema: &Schema) -> SchemaResult<ResolvedSchema> {
    Resolver::new(schema).run()
}

struct Resolver<'s> {
    schema: &'s Schema,
    by_simple_name: HashMap<&'s str, Vec<usize>>,
    types: Vec<ResolvedType>,
    index: HashMap<String, TypeId>,
    externals: HashMap<String, TypeId>,
}

impl<'s> Resolver<'s> {
    fn new(schema: &'s Schema) -> Self {
        let mut by_simple_name: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut index = HashMap::with_capacity(schema.len());
        let mut types = Vec::with_capacity(schema.len());

        for (idx, def) in schema.types().iter().enumerate() {
            by_simple_name.entry(def.name.name()).or_default().push(idx);
            index.insert(def.qualified_name(), TypeId(idx));
            types.push(ResolvedType {
                name: def.name.clone(),
                fields: Vec::new(),
                external: def.external,
            });
        }

        Self {
            schema,
            by_simple_name,
            types,
            index,
            externals: HashMap::new(),
        }
    }

    fn run(mut self) -> SchemaResult<ResolvedSchema> {
        let schema = self.schema;
        let declared = schema.len();
        for (idx, def) in schema.types().iter().enumerate() {
            if def.external {
                continue;
            }
            let fields = def
                .fields
                .iter()
                .map(|field| self.resolve_field(def, field))
                .collect::<SchemaResult<Vec<_>>>()?;
            self.types[idx].fields = fields;
        }

        let dependencies = self
            .types
            .iter()
            .map(|def| {
                let mut deps: Vec<TypeId> = Vec::new();
                for target in def.fields.iter().filter_map(|f| f.ty.compact_ref()) {
                    if !self.types[target.0].external && !deps.contains(target) {
                        deps.push(*target);
                    }
                }
                deps
            })
            .collect();

        debug!(
            declared,
            externals = self.types.len() - declared,
            "resolved schema"
        );

        Ok(ResolvedSchema {
            types: self.types,
            declared,
            dependencies,
            index: self.index,
        })
    }

    fn resolve_field(&mut self, owner: &TypeDef, field: &Field) -> SchemaResult<ResolvedField> {
        let ty = field
            .ty
            .try_map(&mut |reference: &String| self.resolve_reference(owner, field, reference))?;
        Ok(ResolvedField {
            name: field.name.clone(),
            ty,
            default: field.default,
            external: field.external,
        })
    }

    fn resolve_reference(
        &mut self,
        owner: &TypeDef,
        field: &Field,
        reference: &str,
    ) -> SchemaResult<TypeId> {
        if field.external {
            return Ok(self.external(reference));
        }
        if let Some(idx) = self.schema.position(reference) {
            return Ok(TypeId(idx));
        }

        let dotted = reference.contains('.');
        if !dotted {
            if let Some(namespace) = owner.name.namespace()
                && let Some(idx) = self.schema.position(&format!("{namespace}.{reference}"))
            {
                return Ok(TypeId(idx));
            }
            match self.by_simple_name.get(reference).map(Vec::as_slice) {
                Some([idx]) => return Ok(TypeId(*idx)),
                Some(candidates) if candidates.len() > 1 => {
                    return Err(SchemaError::AmbiguousReference {
                        type_name: owner.qualified_name(),
                        field: field.name.clone(),
                        reference: reference.to_string(),
                        candidates: candidates
                            .iter()
                            .map(|idx| self.schema.types()[*idx].qualified_name())
                            .collect(),
                    });
                }
                _ => {}
            }
            return Err(SchemaError::UnresolvedReference {
                type_name: owner.qualified_name(),
                field: field.name.clone(),
                reference: reference.to_string(),
            });
        }

        Ok(self.external(reference))
    }

    fn external(&mut self, reference: &str) -> TypeId {
        if let Some(id) = self.externals.get(reference) {
            return *id;
        }
        let id = TypeId(self.types.len());
        debug!(reference, "materialized external type");
        self.types.push(ResolvedType::external(QualifiedName::parse(reference)));
        self.externals.insert(reference.to_string(), id);
        self.index.entry(reference.to_string()).or_insert(id);
        id
    }
}
