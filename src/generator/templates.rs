use super::error::TemplateError;
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;

/// Names of the fragments the renderer looks up, one per construct kind.
pub mod fragments {
    /// Whole output file, receives the rendered type blocks
    pub const API: &str = "api";
    pub const TYPE_OBJECT: &str = "type.object";
    pub const TYPE_INPUT: &str = "type.input";
    pub const TYPE_SCALAR: &str = "type.scalar";
    pub const TYPE_ENUM: &str = "type.enum";
    /// Member of an object type
    pub const FIELD_METHOD: &str = "field.method";
    /// Member of an input type
    pub const FIELD_PROPERTY: &str = "field.property";
    pub const PRIMITIVE: &str = "primitive";
    /// Named link to another type; bodies are never inlined
    pub const REFERENCE: &str = "reference";
    pub const WRAPPER_LIST: &str = "wrapper.list";
    pub const WRAPPER_OPTIONAL: &str = "wrapper.optional";
}

const DENO_FRAGMENTS: &[(&str, &str)] = &[
    (fragments::API, include_str!("../../templates/deno/api.j2")),
    (fragments::TYPE_OBJECT, include_str!("../../templates/deno/type.object.j2")),
    (fragments::TYPE_INPUT, include_str!("../../templates/deno/type.input.j2")),
    (fragments::TYPE_SCALAR, include_str!("../../templates/deno/type.scalar.j2")),
    (fragments::TYPE_ENUM, include_str!("../../templates/deno/type.enum.j2")),
    (fragments::FIELD_METHOD, include_str!("../../templates/deno/field.method.j2")),
    (fragments::FIELD_PROPERTY, include_str!("../../templates/deno/field.property.j2")),
    (fragments::PRIMITIVE, include_str!("../../templates/deno/primitive.j2")),
    (fragments::REFERENCE, include_str!("../../templates/deno/reference.j2")),
    (fragments::WRAPPER_LIST, include_str!("../../templates/deno/wrapper.list.j2")),
    (fragments::WRAPPER_OPTIONAL, include_str!("../../templates/deno/wrapper.optional.j2")),
];

/// A library of named template fragments.
///
/// Wraps a minijinja environment configured for source generation: strict
/// undefined values, trimmed block tags and no auto-escaping.
#[derive(Debug)]
pub struct TemplateSet {
    env: Environment<'static>,
}

impl TemplateSet {
    /// A set with no fragments registered.
    pub fn empty() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("jsdoc", jsdoc);
        Self { env }
    }

    /// The built-in Deno (TypeScript) client fragments.
    pub fn deno() -> Result<Self, TemplateError> {
        let mut set = Self::empty();
        for &(name, source) in DENO_FRAGMENTS {
            set.insert(name, source)?;
        }
        Ok(set)
    }

    /// Register or replace a fragment.
    pub fn with_fragment(
        mut self,
        name: &'static str,
        source: &'static str,
    ) -> Result<Self, TemplateError> {
        self.insert(name, source)?;
        Ok(self)
    }

    /// Drop a fragment; rendering it afterwards fails with
    /// [`TemplateError::UndefinedFragment`].
    pub fn without_fragment(mut self, name: &str) -> Self {
        self.env.remove_template(name);
        self
    }

    #[must_use]
    pub fn has_fragment(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Render the fragment `name` with `ctx`.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, TemplateError> {
        let template = self.env.get_template(name).map_err(|source| {
            if source.kind() == ErrorKind::TemplateNotFound {
                TemplateError::UndefinedFragment {
                    name: name.to_string(),
                }
            } else {
                TemplateError::Render {
                    name: name.to_string(),
                    source,
                }
            }
        })?;
        template.render(ctx).map_err(|source| TemplateError::Render {
            name: name.to_string(),
            source,
        })
    }

    fn insert(&mut self, name: &'static str, source: &'static str) -> Result<(), TemplateError> {
        self.env
            .add_template(name, source)
            .map_err(|source| TemplateError::Syntax {
                name: name.to_string(),
                source,
            })
    }
}

/// Format a description as a JSDoc block indented by `indent` spaces.
fn jsdoc(value: String, indent: Option<usize>) -> String {
    let pad = " ".repeat(indent.unwrap_or(0));
    let mut out = format!("{pad}/**\n");
    for line in value.replace("*/", "*\\/").lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(&format!("{pad} *\n"));
        } else {
            out.push_str(&format!("{pad} * {line}\n"));
        }
    }
    out.push_str(&format!("{pad} */"));
    out
}
