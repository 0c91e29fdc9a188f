//! # sdkgen
//!
//! **sdkgen** turns an introspected API schema into a generated client SDK
//! (a Deno / TypeScript client), staged in an in-memory file tree rather than
//! written straight to disk.
//!
//! ## Overview
//!
//! The generation pipeline is deterministic: the same schema, in any input
//! order, yields byte-identical output. Named types are always rendered as
//! references, so self-referential and mutually-referential type graphs are
//! handled without unbounded recursion.
//!
//! ## Architecture
//!
//! - **[`introspection`]** - Schema model (types, fields, type references), JSON/YAML loading
//! - **[`generator`]** - Canonicalizer, render context, templates, renderer and the
//!   [`Generator`] entry point
//! - **[`overlay`]** - In-memory staging filesystem returned to the caller
//! - **[`cancel`]** - Cancellation token checked on entry to a generation call
//! - **[`logging`]** - `tracing` subscriber setup for the binary
//! - **[`cli`]** - `sdkgen` command-line interface
//!
//! ### Code Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(sdkgen)
//!     participant Gen as DenoGenerator
//!     participant Canon as canonicalize
//!     participant Render as render
//!     participant Overlay as Overlay
//!
//!     CLI->>Gen: generate(&cancel, &schema)
//!     Gen->>Gen: check cancellation
//!     Gen->>Canon: sort a private copy
//!     Canon-->>Gen: CanonicalSchema
//!     Gen->>Render: render(&RenderContext, &TemplateSet)
//!     Render-->>Gen: client source
//!     Gen->>Overlay: ensure_directory(".fluentci/sdk", 0o755)
//!     Gen->>Overlay: write_file(".fluentci/sdk/client.gen.ts", 0o600)
//!     Gen-->>CLI: GeneratedState
//!     CLI->>CLI: write_overlay or print (dry run)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use sdkgen::cancel::CancelToken;
//! use sdkgen::generator::{DenoGenerator, Generator, CLIENT_GEN_FILE};
//! use sdkgen::introspection::{Field, Primitive, Schema, Type, TypeRef};
//!
//! let schema = Schema {
//!     types: vec![Type::object(
//!         "Query",
//!         vec![Field::new("version", TypeRef::primitive(Primitive::String))],
//!     )],
//! };
//!
//! let generator = DenoGenerator::new().unwrap();
//! let state = generator.generate(&CancelToken::new(), &schema).unwrap();
//! let client = state.overlay().read_file(CLIENT_GEN_FILE).unwrap();
//! assert!(std::str::from_utf8(client).unwrap().contains("export class Query"));
//! ```

pub mod cancel;
pub mod cli;
pub mod generator;
pub mod introspection;
pub mod logging;
pub mod overlay;

pub use cancel::CancelToken;
pub use generator::{
    generator_for, GeneratedState, Generator, GeneratorConfig, GeneratorError, TemplateError,
};
pub use introspection::{load_schema, Schema};
pub use overlay::{FileSystemError, Overlay};
