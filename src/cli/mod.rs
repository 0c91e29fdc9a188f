//! # CLI Module
//!
//! Command-line front end for the SDK generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate the client SDK and write it under the output directory:
//!
//! ```bash
//! sdkgen generate --schema schema.json --output .
//! ```
//!
//! Options:
//! - `--schema <FILE>` - Introspected schema, JSON or YAML (required)
//! - `--config <FILE>` - Generator config; defaults to `sdkgen.toml` next to the schema
//! - `--output <DIR>` - Output directory (overrides `output_dir` from the config)
//! - `--dry-run` - Print the staged tree instead of writing it
//!
//! SIGINT and SIGTERM are trapped from startup: the first one cancels the run
//! (nothing is written once it is seen), a second one exits immediately.
//!
//! ### `canonicalize`
//!
//! Print the schema in canonical order:
//!
//! ```bash
//! sdkgen canonicalize --schema schema.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use sdkgen::cancel::CancelToken;
//! use sdkgen::cli::{execute, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! execute(cli, &CancelToken::new())?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, print_overlay, run_cli, write_overlay, Cli, Commands};
