use super::context::RenderContext;
use super::error::TemplateError;
use super::templates::{fragments, TemplateSet};
use crate::introspection::{Field, InputValue, Type, TypeKind, TypeRef};
use minijinja::context;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::trace;

/// Render every type of `ctx` into one source file.
///
/// Types and fields are emitted in canonical order. References to other types
/// are rendered through the `reference` fragment only, so self- and
/// mutually-referential schemas produce output linear in the schema size.
pub fn render(ctx: &RenderContext<'_>, templates: &TemplateSet) -> Result<String, TemplateError> {
    Renderer::new(ctx, templates).render_api()
}

#[derive(Serialize)]
struct ArgView {
    name: String,
    ty: String,
    optional: bool,
    description: Option<String>,
}

struct Renderer<'c, 's> {
    ctx: &'c RenderContext<'s>,
    templates: &'c TemplateSet,
    /// Types whose body is being rendered right now; a reference to one of
    /// them is flagged `recursive`
    expanding: BTreeSet<&'s str>,
}

impl<'c, 's> Renderer<'c, 's> {
    fn new(ctx: &'c RenderContext<'s>, templates: &'c TemplateSet) -> Self {
        Self {
            ctx,
            templates,
            expanding: BTreeSet::new(),
        }
    }

    fn render_api(mut self) -> Result<String, TemplateError> {
        let types = self.ctx.types();
        let mut blocks = Vec::with_capacity(types.len());
        for ty in types {
            blocks.push(self.expand_type(ty)?);
        }
        self.templates.render(
            fragments::API,
            context! { blocks => blocks, type_count => types.len() },
        )
    }

    fn expand_type(&mut self, ty: &'s Type) -> Result<String, TemplateError> {
        trace!(name = %ty.name, kind = %ty.kind, "expanding type");
        self.expanding.insert(ty.name.as_str());
        let body = self.type_body(ty);
        self.expanding.remove(ty.name.as_str());
        body
    }

    fn type_body(&self, ty: &'s Type) -> Result<String, TemplateError> {
        match ty.kind {
            TypeKind::Object => {
                let members = ty
                    .fields
                    .iter()
                    .map(|field| self.method(ty, field))
                    .collect::<Result<Vec<_>, _>>()?;
                self.templates.render(
                    fragments::TYPE_OBJECT,
                    context! { name => ty.name, description => ty.description, members => members },
                )
            }
            TypeKind::InputObject => {
                let members = ty
                    .fields
                    .iter()
                    .map(|field| self.property(ty, field))
                    .collect::<Result<Vec<_>, _>>()?;
                self.templates.render(
                    fragments::TYPE_INPUT,
                    context! { name => ty.name, description => ty.description, members => members },
                )
            }
            TypeKind::Scalar => {
                self.check_fields(ty)?;
                self.templates.render(
                    fragments::TYPE_SCALAR,
                    context! { name => ty.name, description => ty.description },
                )
            }
            TypeKind::Enum => {
                self.check_fields(ty)?;
                self.templates.render(
                    fragments::TYPE_ENUM,
                    context! {
                        name => ty.name,
                        description => ty.description,
                        values => ty.enum_values,
                    },
                )
            }
        }
    }

    /// Scalars and enums emit no members, but their fields must still resolve.
    fn check_fields(&self, ty: &Type) -> Result<(), TemplateError> {
        for field in &ty.fields {
            self.type_expr(ty, &field.name, &field.type_ref)?;
            for arg in &field.args {
                self.arg(ty, field, arg)?;
            }
        }
        Ok(())
    }

    fn method(&self, owner: &Type, field: &Field) -> Result<String, TemplateError> {
        let ty = self.type_expr(owner, &field.name, &field.type_ref)?;
        let args = field
            .args
            .iter()
            .map(|arg| self.arg(owner, field, arg))
            .collect::<Result<Vec<_>, _>>()?;
        let args_optional = args.iter().all(|a| a.optional);
        let chain_target = match self.chain_target(owner, field)? {
            Some(target) => Some(self.type_expr(owner, &field.name, target)?),
            None => None,
        };
        self.templates.render(
            fragments::FIELD_METHOD,
            context! {
                name => field.name,
                description => field.description,
                ty => ty,
                args => args,
                args_optional => args_optional,
                chain_target => chain_target,
            },
        )
    }

    fn property(&self, owner: &Type, field: &Field) -> Result<String, TemplateError> {
        let ty = self.type_expr(owner, &field.name, &field.type_ref)?;
        self.templates.render(
            fragments::FIELD_PROPERTY,
            context! {
                name => field.name,
                description => field.description,
                ty => ty,
                optional => field.type_ref.is_optional(),
            },
        )
    }

    fn arg(
        &self,
        owner: &Type,
        field: &Field,
        arg: &InputValue,
    ) -> Result<ArgView, TemplateError> {
        let member = format!("{}.{}", field.name, arg.name);
        Ok(ArgView {
            name: arg.name.clone(),
            ty: self.type_expr(owner, &member, &arg.type_ref)?,
            optional: arg.type_ref.is_optional(),
            description: arg.description.clone(),
        })
    }

    /// A field continues the query chain when it yields a single object.
    fn chain_target<'f>(
        &self,
        owner: &Type,
        field: &'f Field,
    ) -> Result<Option<&'f TypeRef>, TemplateError> {
        if field.type_ref.is_list() {
            return Ok(None);
        }
        let target = field.type_ref.unwrapped();
        match target {
            TypeRef::Named { name } => {
                let ty = self.resolve(owner, &field.name, name)?;
                Ok((ty.kind == TypeKind::Object).then_some(target))
            }
            _ => Ok(None),
        }
    }

    /// Recursive descent over a type reference.
    fn type_expr(
        &self,
        owner: &Type,
        member: &str,
        type_ref: &TypeRef,
    ) -> Result<String, TemplateError> {
        match type_ref {
            TypeRef::Primitive { name } => self
                .templates
                .render(fragments::PRIMITIVE, context! { name => name.as_str() }),
            TypeRef::Named { name } => {
                let target = self.resolve(owner, member, name)?;
                let recursive = self.expanding.contains(target.name.as_str());
                self.reference(target, recursive)
            }
            TypeRef::List { of } => {
                let inner = self.type_expr(owner, member, of)?;
                self.templates
                    .render(fragments::WRAPPER_LIST, context! { inner => inner })
            }
            TypeRef::Optional { of } => {
                let inner = self.type_expr(owner, member, of)?;
                self.templates
                    .render(fragments::WRAPPER_OPTIONAL, context! { inner => inner })
            }
        }
    }

    fn reference(&self, target: &Type, recursive: bool) -> Result<String, TemplateError> {
        self.templates.render(
            fragments::REFERENCE,
            context! {
                name => target.name,
                kind => target.kind.to_string(),
                recursive => recursive,
            },
        )
    }

    fn resolve(&self, owner: &Type, member: &str, name: &str) -> Result<&'s Type, TemplateError> {
        self.ctx
            .lookup(name)
            .ok_or_else(|| TemplateError::UnresolvedType {
                owner: owner.name.clone(),
                member: member.to_string(),
                reference: name.to_string(),
            })
    }
}
