use crate::cancel::CancelToken;
use crate::generator::{self, canonicalize, GeneratorConfig, GeneratorError};
use crate::introspection::load_schema;
use crate::overlay::{Entry, Overlay};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Command-line interface for sdkgen
///
/// Generates client SDKs from an introspected API schema.
#[derive(Parser)]
#[command(name = "sdkgen")]
#[command(about = "Client SDK generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate the client SDK for a schema
    Generate {
        /// Path to the introspected schema (JSON or YAML)
        #[arg(short, long)]
        schema: PathBuf,

        /// Path to the generator config (sdkgen.toml)
        /// If not provided, will auto-detect alongside the schema
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory to write the generated tree into (overrides the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// List the staged files without writing anything
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print the schema in canonical order as JSON
    Canonicalize {
        /// Path to the introspected schema (JSON or YAML)
        #[arg(short, long)]
        schema: PathBuf,
    },
}

/// Parse the process arguments and execute the command
///
/// SIGINT / SIGTERM handlers are installed before anything is loaded. The
/// first signal cancels the run; a second one terminates the process.
///
/// # Errors
///
/// Returns an error if:
/// - Signal handlers cannot be installed
/// - The schema or config cannot be loaded or parsed
/// - Generation fails or is interrupted
/// - The staged tree cannot be written to disk
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cancel = CancelToken::new();
    install_signal_handlers(&cancel)?;
    execute(cli, &cancel)
}

/// Execute an already-parsed command line.
///
/// `cancel` is checked when generation starts and again before anything is
/// written to disk.
pub fn execute(cli: Cli, cancel: &CancelToken) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            schema,
            config,
            output,
            dry_run,
        } => {
            let schema_doc = load_schema(&schema)?;
            let mut gen_config = match generator::resolve_config_path(config.as_deref(), &schema) {
                Some(path) => {
                    debug!(path = %path.display(), "using generator config");
                    generator::load_config(&path)?.unwrap_or_default()
                }
                None => GeneratorConfig::default(),
            };
            if let Some(output) = output {
                gen_config.output_dir = output;
            }

            let generator = generator::generator_for(&gen_config)?;
            let state = generator
                .generate(cancel, &schema_doc)
                .with_context(|| format!("Failed to generate SDK for {}", schema.display()))?;

            if dry_run {
                print_overlay(state.overlay(), &mut std::io::stdout().lock())?;
                return Ok(());
            }
            if cancel.is_cancelled() {
                return Err(GeneratorError::Canceled).with_context(|| {
                    format!("Nothing written to {}", gen_config.output_dir.display())
                });
            }
            write_overlay(state.overlay(), &gen_config.output_dir)?;
            info!(
                lang = %gen_config.lang,
                output = %gen_config.output_dir.display(),
                "generated SDK"
            );
            Ok(())
        }
        Commands::Canonicalize { schema } => {
            let schema_doc = load_schema(&schema)?;
            let canonical = canonicalize(&schema_doc);
            let json = serde_json::to_string_pretty(&canonical)
                .context("Failed to serialize canonical schema")?;
            println!("{json}");
            Ok(())
        }
    }
}

/// Persist `overlay` under `root`, applying the staged permission bits.
///
/// Directories are created as needed; files are overwritten.
pub fn write_overlay(overlay: &Overlay, root: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create output directory {}", root.display()))?;

    for (path, entry) in overlay.iter() {
        let target = root.join(path.to_path_buf());
        match entry {
            Entry::Dir { mode } => {
                fs::create_dir_all(&target)
                    .with_context(|| format!("Failed to create {}", target.display()))?;
                set_mode(&target, *mode)?;
            }
            Entry::File { contents, mode } => {
                fs::write(&target, contents)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                set_mode(&target, *mode)?;
                debug!(path = %target.display(), bytes = contents.len(), "wrote file");
            }
        }
    }
    Ok(())
}

/// One line per staged entry: octal mode, then path (directories end in `/`).
pub fn print_overlay(overlay: &Overlay, out: &mut impl Write) -> anyhow::Result<()> {
    for (path, entry) in overlay.iter() {
        let suffix = if entry.is_dir() { "/" } else { "" };
        writeln!(out, "{:04o} {}{}", entry.mode(), path, suffix)?;
    }
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> anyhow::Result<()> {
    Ok(())
}

/// SIGINT / SIGTERM set the cancellation flag; a second signal while the
/// flag is already set exits with status 1.
#[cfg(unix)]
fn install_signal_handlers(cancel: &CancelToken) -> anyhow::Result<()> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::flag;

    for signal in [SIGINT, SIGTERM] {
        // Registered first so it sees the flag before this signal sets it.
        flag::register_conditional_shutdown(signal, 1, cancel.flag())
            .with_context(|| format!("Failed to register shutdown for signal {signal}"))?;
        flag::register(signal, cancel.flag())
            .with_context(|| format!("Failed to register handler for signal {signal}"))?;
    }
    debug!("signal handlers installed (SIGINT, SIGTERM)");
    Ok(())
}

#[cfg(not(unix))]
fn install_signal_handlers(_cancel: &CancelToken) -> anyhow::Result<()> {
    Ok(())
}
