//! Dependency ordering of declared types
//!
//! Depth-first postorder over the compact-reference graph. Roots are
//! visited in declaration order and neighbours in field order, so the
//! result is deterministic for an unchanged schema.

use crate::error::{SchemaError, SchemaResult};
use crate::resolve::{ResolvedSchema, TypeId};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Emission order of the non-external types: every type comes after
/// every compact type it references.
///
/// # Errors
///
/// `CyclicTypeDependency` with the cycle path, e.g. `A -> B -> A`.
pub fn emission_order(resolved: &ResolvedSchema) -> SchemaResult<Vec<TypeId>> {
    let mut orderer = Orderer {
        resolved,
        marks: vec![Mark::Unvisited; resolved.len()],
        stack: Vec::new(),
        order: Vec::new(),
    };

    for root in resolved.declared() {
        if !resolved.get(root).external {
            orderer.visit(root)?;
        }
    }

    debug!(types = orderer.order.len(), "ordered types");
    Ok(orderer.order)
}

struct Orderer<'a> {
    resolved: &'a ResolvedSchema,
    marks: Vec<Mark>,
    stack: Vec<TypeId>,
    order: Vec<TypeId>,
}

impl Orderer<'_> {
    fn visit(&mut self, id: TypeId) -> SchemaResult<()> {
        match self.marks[id.index()] {
            Mark::Done => return Ok(()),
            Mark::InProgress => return Err(self.cycle_from(id)),
            Mark::Unvisited => {}
        }

        self.marks[id.index()] = Mark::InProgress;
        self.stack.push(id);
        let resolved = self.resolved;
        for dependency in resolved.dependencies(id) {
            self.visit(*dependency)?;
        }
        self.stack.pop();
        self.marks[id.index()] = Mark::Done;
        self.order.push(id);
        Ok(())
    }

    fn cycle_from(&self, id: TypeId) -> SchemaError {
        let start = self.stack.iter().position(|on_stack| *on_stack == id).unwrap_or(0);
        let path = self.stack[start..]
            .iter()
            .chain(std::iter::once(&id))
            .map(|member| self.resolved.get(*member).qualified_name())
            .collect();
        SchemaError::CyclicTypeDependency { path }
    }
}
