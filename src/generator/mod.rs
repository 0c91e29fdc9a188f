//! # Generator Module
//!
//! Turns an introspected API schema into client SDK source, staged into an
//! in-memory [`Overlay`] instead of being written to disk.
//!
//! ## Architecture
//!
//! ```text
//! Schema → canonicalize → RenderContext → render (templates) → Overlay → GeneratedState
//! ```
//!
//! 1. **Canonicalizer** - sorts a private copy of the schema into a stable order
//! 2. **Render Context** - per-call `name → Type` index, passed to every step
//! 3. **Renderer** - recursive, cycle-safe walk over types and type references
//! 4. **Templates** - minijinja fragments, one per construct kind
//! 5. **Overlay** - the rendered client is staged at [`CLIENT_GEN_FILE`]
//!
//! Identical schemas (in any input order) produce byte-identical output.
//! Named types are always emitted as references, never inlined, so
//! self-referential and mutually-referential schemas terminate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sdkgen::cancel::CancelToken;
//! use sdkgen::generator::{generator_for, GeneratorConfig};
//!
//! let generator = generator_for(&GeneratorConfig::default())?;
//! let state = generator.generate(&CancelToken::new(), &schema)?;
//! let client = state.overlay().read_file(".fluentci/sdk/client.gen.ts");
//! ```

mod canonical;
mod config;
mod context;
mod deno;
mod error;
mod render;
mod templates;

pub use canonical::{canonicalize, field_order, CanonicalSchema};
pub use config::{
    auto_detect_config_path, load_config, resolve_config_path, GeneratorConfig, Lang,
    CONFIG_FILE_NAME,
};
pub use context::RenderContext;
pub use deno::{DenoGenerator, CLIENT_GEN_FILE, DIR_MODE, FILE_MODE, SDK_DIR};
pub use error::{GeneratorError, TemplateError};
pub use render::render;
pub use templates::{fragments, TemplateSet};

use crate::cancel::CancelToken;
use crate::introspection::Schema;
use crate::overlay::Overlay;

/// A target-language SDK generator.
///
/// Implementations hold no per-call state; each call owns its canonical
/// schema, render context and overlay.
pub trait Generator: Send + Sync {
    /// Generate the SDK for `schema`.
    ///
    /// Returns [`GeneratorError::Canceled`] without doing any work when
    /// `cancel` is already set. Any failure aborts the call and no partial
    /// state is returned.
    fn generate(
        &self,
        cancel: &CancelToken,
        schema: &Schema,
    ) -> Result<GeneratedState, GeneratorError>;
}

/// Result of a successful generation call: the staged file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedState {
    overlay: Overlay,
}

impl GeneratedState {
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn into_overlay(self) -> Overlay {
        self.overlay
    }
}

/// Select the generator for the configured language.
pub fn generator_for(config: &GeneratorConfig) -> Result<Box<dyn Generator>, GeneratorError> {
    match config.lang {
        Lang::Deno => Ok(Box::new(DenoGenerator::new()?)),
    }
}
