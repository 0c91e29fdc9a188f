//! # Introspection Model
//!
//! The schema shape consumed by the generator: an ordered list of named
//! [`Type`]s, each carrying [`Field`]s whose types are described by a
//! recursive [`TypeRef`].
//!
//! How a schema is obtained (introspection query, cached file, ...) is not
//! the generator's concern. [`load_schema`] is provided for the CLI and for
//! fixtures and accepts JSON or YAML.
//!
//! ## JSON Shape
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "name": "Container",
//!       "kind": "OBJECT",
//!       "fields": [
//!         { "name": "id", "type": { "kind": "named", "name": "ContainerID" } },
//!         { "name": "parent", "type": { "kind": "optional", "of": { "kind": "named", "name": "Container" } } }
//!       ]
//!     },
//!     { "name": "ContainerID", "kind": "SCALAR" }
//!   ]
//! }
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// An introspected API schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Types in source order (normative only after canonicalization)
    #[serde(default)]
    pub types: Vec<Type>,
}

/// What a [`Type`] describes, following GraphQL introspection kinds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    /// A record with resolvable fields
    #[default]
    Object,
    /// A record accepted as an argument
    InputObject,
    /// An opaque scalar (usually an identifier)
    Scalar,
    /// A closed set of string values
    Enum,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeKind::Object => "OBJECT",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::Scalar => "SCALAR",
            TypeKind::Enum => "ENUM",
        };
        f.write_str(s)
    }
}

/// A named type of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    /// Unique name within the schema
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Values of an `ENUM` type, kept in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl Type {
    /// An `OBJECT` type with the given fields.
    pub fn object(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Object,
            description: None,
            fields,
            enum_values: Vec::new(),
        }
    }

    /// A `SCALAR` type.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Scalar,
            description: None,
            fields: Vec::new(),
            enum_values: Vec::new(),
        }
    }
}

/// A member of a [`Type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Arguments, kept in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<InputValue>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            description: None,
            args: Vec::new(),
        }
    }
}

/// An argument of a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputValue {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InputValue {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            description: None,
        }
    }
}

/// Built-in scalar tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Primitive {
    String,
    Int,
    Float,
    Boolean,
    #[serde(rename = "ID")]
    Id,
}

impl Primitive {
    /// The tag as it appears in the schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "String",
            Primitive::Int => "Int",
            Primitive::Float => "Float",
            Primitive::Boolean => "Boolean",
            Primitive::Id => "ID",
        }
    }
}

/// The type of a field or argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Primitive { name: Primitive },
    /// Reference to a [`Type`] of the schema by name
    Named { name: String },
    List { of: Box<TypeRef> },
    Optional { of: Box<TypeRef> },
}

impl TypeRef {
    pub fn primitive(p: Primitive) -> Self {
        TypeRef::Primitive { name: p }
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named { name: name.into() }
    }

    pub fn list(of: TypeRef) -> Self {
        TypeRef::List { of: Box::new(of) }
    }

    pub fn optional(of: TypeRef) -> Self {
        TypeRef::Optional { of: Box::new(of) }
    }

    /// The innermost non-wrapper reference.
    pub fn unwrapped(&self) -> &TypeRef {
        match self {
            TypeRef::List { of } | TypeRef::Optional { of } => of.unwrapped(),
            other => other,
        }
    }

    /// Whether a list wrapper appears anywhere along the chain.
    pub fn is_list(&self) -> bool {
        match self {
            TypeRef::List { .. } => true,
            TypeRef::Optional { of } => of.is_list(),
            _ => false,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeRef::Optional { .. })
    }
}

/// Load a schema from a JSON file, or YAML when the extension is `.yaml`/`.yml`.
pub fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let schema = if is_yaml {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML schema: {}", path.display()))?
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON schema: {}", path.display()))?
    };
    Ok(schema)
}
