//! Unit tests for CLI commands
#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::cancel::CancelToken;
use crate::cli::{execute, print_overlay, write_overlay, Cli, Commands};
use crate::generator::GeneratorError;
use crate::overlay::Overlay;
use clap::Parser;
use std::fs;

#[test]
fn test_generate_command_parses() {
    let cli = Cli::try_parse_from(["sdkgen", "generate", "--schema", "schema.json"]).unwrap();

    match cli.command {
        Commands::Generate {
            schema,
            config,
            output,
            dry_run,
        } => {
            assert_eq!(schema.to_string_lossy(), "schema.json");
            assert!(config.is_none());
            assert!(output.is_none());
            assert!(!dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_command_with_flags() {
    let cli = Cli::try_parse_from([
        "sdkgen",
        "generate",
        "-s",
        "schema.yaml",
        "--config",
        "sdkgen.toml",
        "--output",
        "out",
        "--dry-run",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate {
            config,
            output,
            dry_run,
            ..
        } => {
            assert_eq!(config.unwrap().to_string_lossy(), "sdkgen.toml");
            assert_eq!(output.unwrap().to_string_lossy(), "out");
            assert!(dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_schema_is_required() {
    assert!(Cli::try_parse_from(["sdkgen", "generate"]).is_err());
    assert!(Cli::try_parse_from(["sdkgen", "canonicalize"]).is_err());
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["sdkgen", "generate", "--schema", "schema.json"],
        vec!["sdkgen", "canonicalize", "--schema", "schema.json"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}

#[test]
fn test_print_overlay_lists_entries() {
    let mut overlay = Overlay::new();
    overlay.ensure_directory("sdk", 0o755).unwrap();
    overlay.write_file("sdk/client.ts", "x", 0o600).unwrap();

    let mut out = Vec::new();
    print_overlay(&overlay, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "0755 sdk/\n0600 sdk/client.ts\n"
    );
}

#[test]
fn test_write_overlay_persists_tree() {
    let dir = tempfile::tempdir().unwrap();
    let mut overlay = Overlay::new();
    overlay.ensure_directory("a/b", 0o755).unwrap();
    overlay.write_file("a/b/c.ts", "export {};\n", 0o600).unwrap();

    write_overlay(&overlay, dir.path()).unwrap();
    let written = fs::read_to_string(dir.path().join("a/b/c.ts")).unwrap();
    assert_eq!(written, "export {};\n");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = |p: &str| fs::metadata(dir.path().join(p)).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode("a"), 0o755);
        assert_eq!(mode("a/b"), 0o755);
        assert_eq!(mode("a/b/c.ts"), 0o600);
    }
}

#[test]
fn test_execute_generate_writes_client() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.json");
    fs::write(
        &schema,
        r#"{"types":[{"name":"Query","fields":[{"name":"version","type":{"kind":"primitive","name":"String"}}]}]}"#,
    )
    .unwrap();
    let out = dir.path().join("out");

    let cli = Cli::try_parse_from([
        "sdkgen",
        "generate",
        "--schema",
        schema.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();
    execute(cli, &CancelToken::new()).unwrap();

    let client = fs::read_to_string(out.join(".fluentci/sdk/client.gen.ts")).unwrap();
    assert!(client.contains("export class Query extends BaseClient {"));
}

#[test]
fn test_execute_uses_config_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.json");
    fs::write(&schema, r#"{"types":[]}"#).unwrap();
    let out = dir.path().join("from-config");
    fs::write(
        dir.path().join("sdkgen.toml"),
        format!("[generator]\noutput_dir = {:?}\n", out.to_str().unwrap()),
    )
    .unwrap();

    let cli =
        Cli::try_parse_from(["sdkgen", "generate", "--schema", schema.to_str().unwrap()]).unwrap();
    execute(cli, &CancelToken::new()).unwrap();
    assert!(out.join(".fluentci/sdk/client.gen.ts").is_file());
}

#[test]
fn test_execute_missing_schema_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let cli =
        Cli::try_parse_from(["sdkgen", "generate", "--schema", missing.to_str().unwrap()]).unwrap();
    assert!(execute(cli, &CancelToken::new()).is_err());
}

#[test]
fn test_execute_cancelled_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.json");
    fs::write(&schema, r#"{"types":[]}"#).unwrap();
    let out = dir.path().join("out");

    let cancel = CancelToken::new();
    cancel.cancel();
    let cli = Cli::try_parse_from([
        "sdkgen",
        "generate",
        "--schema",
        schema.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();
    let err = execute(cli, &cancel).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GeneratorError>(),
        Some(GeneratorError::Canceled)
    ));
    assert!(!out.exists());
}
