use super::canonical::canonicalize;
use super::context::RenderContext;
use super::error::GeneratorError;
use super::render::render;
use super::templates::TemplateSet;
use super::{GeneratedState, Generator};
use crate::cancel::CancelToken;
use crate::introspection::Schema;
use crate::overlay::Overlay;
use tracing::{debug, info, info_span};

/// Directory holding the generated SDK.
pub const SDK_DIR: &str = ".fluentci/sdk";
/// The generated client module.
pub const CLIENT_GEN_FILE: &str = ".fluentci/sdk/client.gen.ts";
/// Staged directory permissions.
pub const DIR_MODE: u32 = 0o755;
/// Staged file permissions.
pub const FILE_MODE: u32 = 0o600;

/// Generates the Deno (TypeScript) client.
///
/// Holds only immutable template state, so one instance can serve concurrent
/// calls; every call builds its own canonical schema, context and overlay.
#[derive(Debug)]
pub struct DenoGenerator {
    templates: TemplateSet,
}

impl DenoGenerator {
    /// A generator using the built-in Deno fragments.
    pub fn new() -> Result<Self, GeneratorError> {
        Ok(Self::with_templates(TemplateSet::deno()?))
    }

    /// A generator using a caller-supplied fragment library.
    pub fn with_templates(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }
}

impl Generator for DenoGenerator {
    fn generate(
        &self,
        cancel: &CancelToken,
        schema: &Schema,
    ) -> Result<GeneratedState, GeneratorError> {
        if cancel.is_cancelled() {
            debug!("generation canceled before start");
            return Err(GeneratorError::Canceled);
        }
        let span = info_span!("generate", lang = "deno", types = schema.types.len());
        let _enter = span.enter();

        let canonical = canonicalize(schema);
        let ctx = RenderContext::new(&canonical);
        let source = render(&ctx, &self.templates)?;
        debug!(bytes = source.len(), "rendered client");

        let mut overlay = Overlay::new();
        overlay.ensure_directory(SDK_DIR, DIR_MODE)?;
        overlay.write_file(CLIENT_GEN_FILE, source, FILE_MODE)?;

        info!(path = CLIENT_GEN_FILE, "staged generated client");
        Ok(GeneratedState { overlay })
    }
}
