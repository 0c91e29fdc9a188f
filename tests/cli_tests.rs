#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sdkgen() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sdkgen"));
    cmd.env("SDKGEN_LOG_LEVEL", "warn").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_generate_writes_client() {
    let dir = tempfile::tempdir().unwrap();
    let status = sdkgen()
        .arg("generate")
        .arg("--schema")
        .arg(fixture("schema.json"))
        .arg("--output")
        .arg(dir.path())
        .status()
        .expect("run cli");
    assert!(status.success());

    let client = dir.path().join(".fluentci/sdk/client.gen.ts");
    let source = fs::read_to_string(&client).unwrap();
    assert!(source.starts_with("/**\n * Code generated by sdkgen. DO NOT EDIT.\n */\n"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&client).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        let sdk = fs::metadata(dir.path().join(".fluentci/sdk")).unwrap();
        assert_eq!(sdk.permissions().mode() & 0o777, 0o755);
    }
}

#[test]
fn test_cli_dry_run_lists_tree() {
    let dir = tempfile::tempdir().unwrap();
    let output = sdkgen()
        .arg("generate")
        .arg("--schema")
        .arg(fixture("schema.yaml"))
        .arg("--output")
        .arg(dir.path())
        .arg("--dry-run")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "0755 .fluentci/\n0755 .fluentci/sdk/\n0600 .fluentci/sdk/client.gen.ts\n"
    );
    assert!(!dir.path().join(".fluentci").exists());
}

#[test]
fn test_cli_canonicalize_prints_sorted_schema() {
    let output = sdkgen()
        .arg("canonicalize")
        .arg("--schema")
        .arg(fixture("schema.json"))
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let types = value["types"].as_array().unwrap();
    assert_eq!(types[0]["name"], "BuildArg");
    assert_eq!(types[0]["fields"][0]["name"], "name");
    assert_eq!(types[2]["name"], "Container");
    assert_eq!(types[2]["fields"][0]["name"], "id");
}

#[test]
fn test_cli_unresolved_reference_fails() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.json");
    fs::write(
        &schema,
        r#"{"types":[{"name":"Query","fields":[{"name":"file","type":{"kind":"named","name":"File"}}]}]}"#,
    )
    .unwrap();

    let output = sdkgen()
        .arg("generate")
        .arg("--schema")
        .arg(&schema)
        .arg("--output")
        .arg(dir.path().join("out"))
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Query.file refers to unknown type 'File'"), "{stderr}");
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_cli_missing_schema_fails() {
    let output = sdkgen()
        .arg("canonicalize")
        .arg("--schema")
        .arg("does-not-exist.json")
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().starts_with("error:"));
}
