//! Resolution, ordering and identity in one step

use crate::error::SchemaResult;
use crate::identity::{Fingerprint, TypeIdentity, assign_identities};
use crate::order::emission_order;
use crate::resolve::{ResolvedSchema, ResolvedType, TypeId, resolve};
use crate::schema::Schema;
use std::collections::HashMap;
use tracing::info;

/// A schema that passed every check and is ready for emission.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    resolved: ResolvedSchema,
    identities: Vec<TypeIdentity>,
    fingerprints: HashMap<TypeId, Fingerprint>,
}

impl CompiledSchema {
    /// Resolve, order and fingerprint `schema`.
    pub fn compile(schema: &Schema) -> SchemaResult<Self> {
        let resolved = resolve(schema)?;
        let order = emission_order(&resolved)?;
        let identities = assign_identities(&resolved, &order)?;
        let fingerprints = identities
            .iter()
            .map(|identity| (identity.id, identity.fingerprint))
            .collect();

        info!(
            types = identities.len(),
            externals = resolved.externals().count(),
            "compiled schema"
        );

        Ok(Self {
            resolved,
            identities,
            fingerprints,
        })
    }

    pub fn resolved(&self) -> &ResolvedSchema {
        &self.resolved
    }

    /// Non-external types in emission order.
    pub fn identities(&self) -> &[TypeIdentity] {
        &self.identities
    }

    pub fn get(&self, id: TypeId) -> &ResolvedType {
        self.resolved.get(id)
    }

    /// `None` for external types.
    pub fn fingerprint(&self, id: TypeId) -> Option<Fingerprint> {
        self.fingerprints.get(&id).copied()
    }

    /// Types emitted in this run, in emission order.
    pub fn emitted(&self) -> impl Iterator<Item = (&ResolvedType, Fingerprint)> {
        self.identities
            .iter()
            .map(|identity| (self.resolved.get(identity.id), identity.fingerprint))
    }
}
