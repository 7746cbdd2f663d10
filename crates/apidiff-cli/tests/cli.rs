//! End-to-end: convert a Swagger JSON file, then compare the YAML output
//! against an OpenAPI 3 document through the subcommand handlers.

use std::path::PathBuf;

use apidiff_cli::compare::{render_comparison, CompareArgs, ReportFormat};
use apidiff_cli::convert::{run_convert, ConvertArgs};

const SWAGGER_JSON: &str = r##"{
  "swagger": "2.0",
  "definitions": {
    "Catalog": {
      "description": "The root entity for catalog management.",
      "properties": {
        "id": {"type": "string"},
        "validFor": {"$ref": "#/definitions/TimePeriod"}
      }
    },
    "Catalog_Create": {"properties": {"name": {"type": "string"}}},
    "ExportJob": {"properties": {"id": {"type": "string"}}}
  }
}"##;

const OPENAPI_YAML: &str = r##"
openapi: 3.0.1
components:
  schemas:
    Catalog:
      allOf:
        - $ref: "#/components/schemas/Entity"
        - description: The root entity for catalog management.
          properties:
            id: {type: string}
            validFor: {type: object}
            lastUpdate: {type: string}
    Catalog_FVO:
      allOf:
        - $ref: "#/components/schemas/Entity_FVO"
"##;

fn compare_args(old: PathBuf, new: PathBuf, format: ReportFormat) -> CompareArgs {
    CompareArgs {
        old,
        new,
        old_dialect: None,
        new_dialect: None,
        old_label: None,
        new_label: None,
        title: None,
        format,
    }
}

#[test]
fn convert_then_compare_text() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("catalog_swagger.json");
    let yaml = dir.path().join("catalog_swagger.yaml");
    let oas = dir.path().join("catalog.oas.yaml");
    std::fs::write(&json, SWAGGER_JSON).unwrap();
    std::fs::write(&oas, OPENAPI_YAML).unwrap();

    let code = run_convert(&ConvertArgs {
        input: json,
        output: yaml.clone(),
    })
    .unwrap();
    assert_eq!(code, 0);

    let text = render_comparison(&compare_args(yaml, oas, ReportFormat::Text), None).unwrap();
    assert!(text.contains("v4.1.0 (OAS 2.0) vs v5.0.0 (OAS 3.0)"));
    assert!(text.contains("• ExportJob"));
    assert!(text.contains("Schema: Catalog\n"));
    assert!(text.contains("⚠️"));
    assert!(text.contains("✨"));
    assert!(text.contains("    v5.0.0: Catalog_FVO\n"));
}

#[test]
fn compare_json_format_with_config_labels() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.json");
    let new = dir.path().join("new.oas.yaml");
    let config = dir.path().join("compare.yaml");
    std::fs::write(&old, SWAGGER_JSON).unwrap();
    std::fs::write(&new, OPENAPI_YAML).unwrap();
    std::fs::write(&config, "old_label: v1\nnew_label: v2\n").unwrap();

    let rendered =
        render_comparison(&compare_args(old, new, ReportFormat::Json), Some(&config)).unwrap();
    let report: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(report["old"]["label"], "v1");
    assert_eq!(report["new"]["label"], "v2");
    assert_eq!(report["summary"]["common"], 1);
    assert_eq!(report["only_in_old"][0]["name"], "ExportJob");
}

#[test]
fn compare_wrong_dialect_fails() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.json");
    let new = dir.path().join("new.oas.yaml");
    std::fs::write(&old, SWAGGER_JSON).unwrap();
    std::fs::write(&new, "openapi: 3.0.1\ncomponents:\n  schemas: [1, 2]\n").unwrap();

    let err = render_comparison(&compare_args(old, new, ReportFormat::Text), None).unwrap_err();
    assert!(format!("{err:#}").contains("failed to compare"));
}
