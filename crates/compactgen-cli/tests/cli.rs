//! Integration tests for the compactgen binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const EXAMPLES: &str = r#"
namespace: com.example
classes:
  - name: Example1
    fields:
      - { name: example, type: Example2 }
      - { name: examples, type: "Example3[]" }
      - { name: bar, type: com.x.y.z.SomeExternalClass }
  - name: Example2
    fields:
      - { name: id, type: int64 }
  - name: Example3
    fields:
      - { name: label, type: string }
"#;

const CYCLIC: &str = r#"
classes:
  - name: A
    fields:
      - { name: b, type: B }
  - name: B
    fields:
      - { name: a, type: "A[]" }
"#;

fn compactgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_compactgen"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run compactgen")
}

fn write_schema(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path.to_str().unwrap().to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn generate_java_writes_classes_and_prints_hints() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "schema.yaml", EXAMPLES);
    let out = dir.path().join("out");

    let output = compactgen(&[
        "generate",
        &schema,
        "--language",
        "java",
        "--output-dir",
        out.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(out.join("com/example/Example1.java").is_file());
    assert!(!out.join("com/x/y/z/SomeExternalClass.java").exists());
    let printed = stdout(&output);
    assert!(printed.contains("Generated 3 java files"));
    assert!(printed.contains("---------Programmatic configuration---------"));
    assert!(printed.contains("\tnew com.example.Example2.Serializer(),"));
}

#[test]
fn generate_quiet_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "schema.yaml", EXAMPLES);
    let out = dir.path().join("out");

    let output = compactgen(&[
        "generate",
        &schema,
        "-l",
        "java",
        "-o",
        out.to_str().unwrap(),
        "--quiet",
    ]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn generate_reads_config_next_to_schema() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "schema.yaml", EXAMPLES);
    fs::write(
        dir.path().join("compactgen.toml"),
        "[generator]\nlanguage = \"rust\"\noutput_dir = \"generated\"\n\n[rust]\nemit_mod = false\n",
    )
    .unwrap();

    let output = compactgen(&["generate", &schema]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let generated = dir.path().join("generated");
    assert!(generated.join("example1.rs").is_file());
    assert!(generated.join("registry.rs").is_file());
    assert!(!generated.join("mod.rs").exists());
    assert!(stdout(&output).contains("---------Registry setup---------"));
}

#[test]
fn generate_twice_reports_unchanged_files() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "schema.yaml", EXAMPLES);
    let out = dir.path().join("out");
    let args = [
        "generate",
        schema.as_str(),
        "--language",
        "rust",
        "--output-dir",
        out.to_str().unwrap(),
    ];

    compactgen(&args);
    let second = compactgen(&args);

    assert!(stdout(&second).contains("(0 written, 5 unchanged)"));
}

#[test]
fn check_prints_emission_order() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "schema.yaml", EXAMPLES);

    let output = compactgen(&["check", &schema]);

    assert!(output.status.success());
    let printed = stdout(&output);
    let first = printed.find("com.example.Example2").unwrap();
    let second = printed.find("com.example.Example3").unwrap();
    let third = printed.find("com.example.Example1").unwrap();
    assert!(first < second && second < third);
    assert!(printed.contains("✓ External types: 1"));
    assert!(printed.contains("com.x.y.z.SomeExternalClass"));
}

#[test]
fn cyclic_schema_exits_with_two() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "cyclic.yaml", CYCLIC);

    let output = compactgen(&["check", &schema]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cyclic type dependency"));
}

#[test]
fn unrenderable_type_exits_with_three() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(
        dir.path(),
        "bad.yaml",
        "classes:\n  - name: Bad\n    fields:\n      - { name: class, type: int32 }\n",
    );
    let out = dir.path().join("out");

    let output = compactgen(&[
        "generate",
        &schema,
        "--language",
        "java",
        "--output-dir",
        out.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(3));
    assert!(!out.exists());
}

#[test]
fn unsupported_language_exits_with_one() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "schema.yaml", EXAMPLES);

    let output = compactgen(&["generate", &schema, "--language", "go"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported language: go"));
}
