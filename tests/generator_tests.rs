#![allow(clippy::unwrap_used, clippy::expect_used)]

use sdkgen::cancel::CancelToken;
use sdkgen::generator::{
    canonicalize, generator_for, DenoGenerator, Generator, GeneratorConfig, CLIENT_GEN_FILE,
};
use sdkgen::introspection::{load_schema, Field, Primitive, Schema, Type, TypeRef};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn client_source(schema: &Schema) -> String {
    let state = DenoGenerator::new()
        .unwrap()
        .generate(&CancelToken::new(), schema)
        .unwrap();
    String::from_utf8(state.overlay().read_file(CLIENT_GEN_FILE).unwrap().to_vec()).unwrap()
}

#[test]
fn test_json_and_yaml_fixtures_agree() {
    let json = load_schema(&fixture("schema.json")).unwrap();
    let yaml = load_schema(&fixture("schema.yaml")).unwrap();
    assert_eq!(json, yaml);
    assert_eq!(client_source(&json), client_source(&yaml));
}

#[test]
fn test_minimal_client_output() {
    let schema = Schema {
        types: vec![Type::object(
            "Query",
            vec![Field::new("version", TypeRef::primitive(Primitive::String))],
        )],
    };
    let expected = "\
/**
 * Code generated by sdkgen. DO NOT EDIT.
 */

import { BaseClient, computeQuery } from \"./client.ts\";

export class Query extends BaseClient {
  version(): Promise<string> {
    return computeQuery<string>(this._ctx, [
      ...this._queryTree,
      { operation: \"version\" },
    ]);
  }
}
";
    assert_eq!(client_source(&schema), expected);
}

#[test]
fn test_fixture_client() {
    let schema = load_schema(&fixture("schema.json")).unwrap();
    let source = client_source(&schema);

    // Container and Directory reference each other; each is emitted once.
    assert_eq!(source.matches("export class Container ").count(), 1);
    assert_eq!(source.matches("export class Directory ").count(), 1);
    assert_eq!(source.matches("export class").count(), 3);

    assert!(source.contains("  container(args?: { id?: ContainerID | null }): Container {"));
    assert!(source.contains("  rootfs(): Directory {"));
    assert!(source.contains(
        "  withNewFile(args: { path: string; contents?: string | null }): Directory {"
    ));
    assert!(source.contains("  entries(): Promise<string[]> {"));
    assert!(source.contains("  sync(): Promise<ContainerID> {"));
    assert!(source.contains(
        "export enum CacheSharingMode {\n  SHARED = \"SHARED\",\n  PRIVATE = \"PRIVATE\",\n  LOCKED = \"LOCKED\",\n}"
    ));
    assert!(source.contains("/**\n   * Creates a scratch container.\n   */\n  container("));
}

#[test]
fn test_fixture_canonical_order() {
    let schema = load_schema(&fixture("schema.yaml")).unwrap();
    let canonical = canonicalize(&schema);
    let names: Vec<_> = canonical.types().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "BuildArg",
            "CacheSharingMode",
            "Container",
            "ContainerID",
            "Directory",
            "DirectoryID",
            "Query"
        ]
    );
    let container: Vec<_> = canonical.types()[2]
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(
        container,
        vec!["id", "rootfs", "stdout", "sync", "withDirectory", "withExec"]
    );
}

#[test]
fn test_repeated_generation_is_byte_identical() {
    let schema = load_schema(&fixture("schema.json")).unwrap();
    let generator = generator_for(&GeneratorConfig::default()).unwrap();
    let first = generator.generate(&CancelToken::new(), &schema).unwrap();
    let second = generator.generate(&CancelToken::new(), &schema).unwrap();
    assert_eq!(first, second);

    // Each call hands back its own tree.
    let mut owned = first.into_overlay();
    owned.write_file(CLIENT_GEN_FILE, "changed", 0o644).unwrap();
    assert_ne!(
        owned.read_file(CLIENT_GEN_FILE),
        second.overlay().read_file(CLIENT_GEN_FILE)
    );
}
