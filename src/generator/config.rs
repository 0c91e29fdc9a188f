//! Generator configuration
//!
//! Lets a project pin the target language and output directory via a TOML
//! file (`sdkgen.toml`) that sits alongside the introspected schema:
//!
//! ```toml
//! [generator]
//! lang = "deno"
//! output_dir = "."
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// File name looked up next to the schema.
pub const CONFIG_FILE_NAME: &str = "sdkgen.toml";

/// Target language of a generation call. One call produces exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// TypeScript client for the Deno runtime
    #[default]
    Deno,
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::Deno => f.write_str("deno"),
        }
    }
}

/// Settings for a generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub lang: Lang,
    /// Directory the CLI applies the overlay to
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            lang: Lang::Deno,
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    generator: GeneratorConfig,
}

/// Load generator configuration from a TOML file
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but
/// fails to parse.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path).with_context(|| {
        format!("Failed to read generator config: {}", config_path.display())
    })?;

    let file: ConfigFile = toml::from_str(&contents).with_context(|| {
        format!("Failed to parse generator config: {}", config_path.display())
    })?;

    Ok(Some(file.generator))
}

/// Look for `sdkgen.toml` in the same directory as the schema.
pub fn auto_detect_config_path(schema_path: &Path) -> Option<PathBuf> {
    let schema_dir = schema_path.parent()?;
    let config_path = schema_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the schema
/// 3. None (defaults apply)
pub fn resolve_config_path(explicit_path: Option<&Path>, schema_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    auto_detect_config_path(schema_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_config_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[generator]\noutput_dir = \"gen\"\n").unwrap();
        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.lang, Lang::Deno);
        assert_eq!(config.output_dir, PathBuf::from("gen"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "").unwrap();
        assert_eq!(load_config(&path).unwrap(), Some(GeneratorConfig::default()));
    }

    #[test]
    fn test_unknown_lang_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[generator]\nlang = \"cobol\"\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse generator config"));
    }

    #[test]
    fn test_resolve_prefers_explicit_then_schema_dir() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        assert_eq!(resolve_config_path(None, &schema), None);

        let beside = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&beside, "").unwrap();
        assert_eq!(resolve_config_path(None, &schema), Some(beside.clone()));

        let explicit = dir.path().join("other.toml");
        fs::write(&explicit, "").unwrap();
        assert_eq!(
            resolve_config_path(Some(&explicit), &schema),
            Some(explicit.clone())
        );
        let missing = dir.path().join("missing.toml");
        assert_eq!(resolve_config_path(Some(&missing), &schema), Some(beside));
    }
}
