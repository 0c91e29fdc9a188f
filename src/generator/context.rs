use super::canonical::CanonicalSchema;
use crate::introspection::Type;
use std::collections::BTreeMap;

/// Per-call view of the schema handed to every rendering step.
///
/// Borrows the canonical schema it was built from, so it cannot outlive the
/// generation call that owns that schema.
#[derive(Debug)]
pub struct RenderContext<'s> {
    schema: &'s CanonicalSchema,
    index: BTreeMap<&'s str, &'s Type>,
}

impl<'s> RenderContext<'s> {
    /// Index `schema` by type name. On duplicate names the first type in
    /// canonical order keeps the slot.
    pub fn new(schema: &'s CanonicalSchema) -> Self {
        let mut index = BTreeMap::new();
        for ty in schema.types() {
            index.entry(ty.name.as_str()).or_insert(ty);
        }
        Self { schema, index }
    }

    pub fn schema(&self) -> &'s CanonicalSchema {
        self.schema
    }

    /// Types in canonical order.
    pub fn types(&self) -> &'s [Type] {
        self.schema.types()
    }

    /// Resolve a type reference by name.
    pub fn lookup(&self, name: &str) -> Option<&'s Type> {
        self.index.get(name).copied()
    }
}
