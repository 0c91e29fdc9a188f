use crate::introspection::{Field, Schema, Type};
use serde::Serialize;
use std::cmp::Ordering;

/// A schema in canonical order.
///
/// Types are sorted by name; within each type the `id` field comes first and
/// the rest are sorted by name. Both sorts are stable, so duplicates keep
/// their source order. Only [`canonicalize`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalSchema(Schema);

impl CanonicalSchema {
    pub fn types(&self) -> &[Type] {
        &self.0.types
    }

    pub fn as_schema(&self) -> &Schema {
        &self.0
    }

    pub fn into_inner(self) -> Schema {
        self.0
    }
}

/// Reorder a copy of `schema` into canonical order.
///
/// The input is never modified. Argument lists and enum values keep their
/// source order.
pub fn canonicalize(schema: &Schema) -> CanonicalSchema {
    let mut schema = schema.clone();
    schema.types.sort_by(|a, b| a.name.cmp(&b.name));
    for ty in &mut schema.types {
        ty.fields.sort_by(field_order);
    }
    CanonicalSchema(schema)
}

/// `id` sorts before every other name; everything else is ordinal.
pub fn field_order(a: &Field, b: &Field) -> Ordering {
    match (a.name == "id", b.name == "id") {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.name.cmp(&b.name),
    }
}
