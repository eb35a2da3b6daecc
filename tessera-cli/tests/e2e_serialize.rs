//! End-to-end tests for `tessera serialize`.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tessera_cli::commands::{
    InitOptions, SerializeCommandError, SerializeOptions, run_init, run_serialize,
};

const MODEL_JSON: &str = r#"{
    "id": 0,
    "name": "",
    "kind": "project",
    "children": [
        {
            "id": 1,
            "name": "area",
            "kind": "function",
            "flags": { "isExported": true },
            "sources": [{ "fileName": "src/area.ts", "line": 1, "character": 16 }],
            "signatures": [
                {
                    "id": 2,
                    "name": "area",
                    "kind": "callSignature",
                    "parameters": [
                        {
                            "id": 3,
                            "name": "radius",
                            "kind": "parameter",
                            "type": { "type": "intrinsic", "name": "number" }
                        }
                    ],
                    "type": { "type": "intrinsic", "name": "number" }
                }
            ]
        }
    ],
    "groups": [{ "title": "Functions", "kind": "function", "children": [1] }]
}"#;

fn write_config(dir: &Path, extra: &str) -> String {
    let config = format!(
        r#"
input: "{input}"
output:
  directory: "{output}"
  file: "api.json"
package:
  include_version: true
schema:
  url: "https://example.com/schema.json"
  version: "2.0"
{extra}
"#,
        input = dir.join("build").join("model.json").display(),
        output = dir.join("site").display(),
    );
    let path = dir.join("tessera.yaml");
    fs::write(&path, config).unwrap();
    path.to_string_lossy().into_owned()
}

fn setup_project(dir: &Path) {
    fs::create_dir_all(dir.join("build")).unwrap();
    fs::write(dir.join("build").join("model.json"), MODEL_JSON).unwrap();
    fs::write(
        dir.join("package.json"),
        r#"{ "name": "geometry", "version": "v0.3.0" }"#,
    )
    .unwrap();
    fs::write(dir.join("Readme.md"), "# Geometry\n").unwrap();
}

#[test]
fn test_serialize_writes_project_json() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());
    let config = write_config(dir.path(), "");

    let report = run_serialize(SerializeOptions {
        config: Some(config),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(report.output_path, dir.path().join("site").join("api.json"));
    assert_eq!(report.reflections, 4);

    let written = fs::read_to_string(&report.output_path).unwrap();
    assert_eq!(written.len(), report.bytes);
    let output: Value = serde_json::from_str(&written).unwrap();

    assert_eq!(
        output,
        json!({
            "$schema": "https://example.com/schema.json",
            "id": 0,
            "name": "geometry",
            "kind": 1,
            "kindString": "Project",
            "flags": {},
            "children": [{
                "id": 1,
                "name": "area",
                "kind": 64,
                "kindString": "Function",
                "flags": { "isExported": true },
                "signatures": [{
                    "id": 2,
                    "name": "area",
                    "kind": 4096,
                    "kindString": "Call signature",
                    "flags": {},
                    "type": { "type": "intrinsic", "name": "number" },
                    "parameters": [{
                        "id": 3,
                        "name": "radius",
                        "kind": 32768,
                        "kindString": "Parameter",
                        "flags": {},
                        "type": { "type": "intrinsic", "name": "number" }
                    }]
                }],
                "sources": [{ "fileName": "src/area.ts", "line": 1, "character": 16 }]
            }],
            "groups": [{ "title": "Functions", "kind": 64, "children": [1] }],
            "packageName": "geometry",
            "packageVersion": "0.3.0",
            "readme": "# Geometry\n",
            "schemaVersion": "2.0"
        })
    );

    // Envelope fields bracket the project fields.
    assert!(written.trim_start().starts_with("{\n  \"$schema\""));
    assert!(written.trim_end().ends_with("\"schemaVersion\": \"2.0\"\n}"));
}

#[test]
fn test_cli_overrides_output_and_compact() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());
    let config = write_config(dir.path(), "name: \"Geometry API\"");
    let output = dir.path().join("out").join("compact.json");

    let report = run_serialize(SerializeOptions {
        config: Some(config),
        output: Some(output.to_string_lossy().into_owned()),
        compact: true,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(report.output_path, output);
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 1);

    let value: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["name"], json!("Geometry API"));
    assert_eq!(value["packageName"], json!("geometry"));
}

#[test]
fn test_invalid_model_writes_nothing() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());
    let broken = MODEL_JSON.replace("\"children\": [1]", "\"children\": [99]");
    fs::write(dir.path().join("build").join("model.json"), broken).unwrap();
    let config = write_config(dir.path(), "");

    let result = run_serialize(SerializeOptions {
        config: Some(config),
        ..Default::default()
    });

    assert!(matches!(result, Err(SerializeCommandError::Model { .. })));
    assert!(!dir.path().join("site").exists());
}

#[test]
fn test_missing_input_reports_path() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "");

    let err = run_serialize(SerializeOptions {
        config: Some(config),
        ..Default::default()
    })
    .unwrap_err();

    assert!(matches!(err, SerializeCommandError::InputNotFound(_)));
    assert!(err.to_string().contains("model.json"));
}

#[test]
fn test_init_then_serialize() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());
    let config_path = dir.path().join("tessera.yaml");

    run_init(InitOptions {
        output: Some(config_path.to_string_lossy().into_owned()),
        force: false,
    })
    .unwrap();

    let model = dir.path().join("build").join("model.json");
    let output = dir.path().join("docs").join("project.json");
    let report = run_serialize(SerializeOptions {
        config: Some(config_path.to_string_lossy().into_owned()),
        input: Some(model.to_string_lossy().into_owned()),
        output: Some(output.to_string_lossy().into_owned()),
        compact: false,
    })
    .unwrap();

    let written = fs::read_to_string(&report.output_path).unwrap();
    let value: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["name"], json!("geometry"));
    assert_eq!(value["schemaVersion"], json!("1.0"));
    assert!(value.get("packageVersion").is_none());
    assert!(value.get("$schema").is_none());
}
