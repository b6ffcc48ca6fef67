//! Type identity: stable fingerprints derived from a type's shape
//!
//! The fingerprint is a version 8 UUID built from the first 16 bytes of
//! the SHA-256 digest of the type's canonical signature:
//!
//! ```text
//! com.example.Example1|example:compact<com.example.Example2>;examples:compact<com.example.Example3>[]
//! ```
//!
//! Renaming, retyping, adding, removing or reordering a field changes the
//! fingerprint. Defaults do not take part.

use crate::error::{SchemaError, SchemaResult};
use crate::resolve::{ResolvedSchema, TypeId};
use crate::schema::FieldType;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use tracing::debug;
use uuid::{Builder, Uuid};

/// UUID-shaped type name carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(Uuid);

impl Fingerprint {
    /// Fingerprint of a canonical signature.
    pub fn of_signature(signature: &str) -> Self {
        let digest = Sha256::digest(signature.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Fingerprint(Builder::from_custom_bytes(bytes).into_uuid())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A non-external type together with its fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeIdentity {
    pub id: TypeId,
    pub fingerprint: Fingerprint,
}

/// Canonical signature: `<qualified name>|<field>:<type>;...`.
pub fn signature(resolved: &ResolvedSchema, id: TypeId) -> String {
    let def = resolved.get(id);
    let fields: Vec<String> = def
        .fields
        .iter()
        .map(|field| format!("{}:{}", field.name, type_signature(resolved, &field.ty)))
        .collect();
    format!("{}|{}", def.qualified_name(), fields.join(";"))
}

fn type_signature(resolved: &ResolvedSchema, ty: &FieldType<TypeId>) -> String {
    match ty {
        FieldType::Compact(target) => format!("compact<{}>", resolved.get(*target).qualified_name()),
        FieldType::Array(element) => format!("{}[]", type_signature(resolved, element)),
        scalar => scalar.to_string(),
    }
}

pub fn fingerprint(resolved: &ResolvedSchema, id: TypeId) -> Fingerprint {
    Fingerprint::of_signature(&signature(resolved, id))
}

/// Fingerprint every type of `order`, keeping that order.
///
/// # Errors
///
/// `FingerprintCollision` if two types share a fingerprint.
pub fn assign_identities(
    resolved: &ResolvedSchema,
    order: &[TypeId],
) -> SchemaResult<Vec<TypeIdentity>> {
    let mut seen: HashMap<Fingerprint, TypeId> = HashMap::with_capacity(order.len());
    let mut identities = Vec::with_capacity(order.len());

    for &id in order {
        let fingerprint = fingerprint(resolved, id);
        match seen.entry(fingerprint) {
            Entry::Occupied(slot) => {
                return Err(SchemaError::FingerprintCollision {
                    first: resolved.get(*slot.get()).qualified_name(),
                    second: resolved.get(id).qualified_name(),
                    fingerprint: fingerprint.to_string(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
        debug!(type_name = %resolved.get(id).name, %fingerprint, "assigned fingerprint");
        identities.push(TypeIdentity { id, fingerprint });
    }

    Ok(identities)
}
