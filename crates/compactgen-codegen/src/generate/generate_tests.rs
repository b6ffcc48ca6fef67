#![allow(non_snake_case)]

use super::*;
use crate::error::EmissionError;
use compactgen_core::{SourceFormat, parse_schema};
use std::fs;
use tempfile::TempDir;
use test_case::test_case;

const SHAPES: &str = r#"
namespace: com.example.shapes
classes:
  - name: Shape
    fields:
      - { name: origin, type: Point }
      - { name: sides, type: int32 }
  - name: Point
    fields:
      - { name: x, type: float64 }
      - { name: y, type: float64 }
"#;

fn compile(yaml: &str) -> CompiledSchema {
    let schema = parse_schema(yaml, SourceFormat::Yaml, Path::new(".")).unwrap();
    CompiledSchema::compile(&schema).unwrap()
}

#[test_case(Language::Java, &["com/example/shapes/Point.java", "com/example/shapes/Shape.java"] ; "java")]
#[test_case(Language::Rust, &["point.rs", "shape.rs", "registry.rs", "mod.rs"] ; "rust")]
fn render___dispatches_on_language(language: Language, expected: &[&str]) {
    let units = render(&compile(SHAPES), language, &GeneratorConfig::default()).unwrap();

    let paths: Vec<&Path> = units.iter().map(|u| u.relative_path.as_path()).collect();
    let expected: Vec<&Path> = expected.iter().map(Path::new).collect();
    assert_eq!(paths, expected);
}

#[test]
fn hints___java_disabled___returns_nothing() {
    let mut config = GeneratorConfig::default();
    config.java.hints = false;

    assert!(hints(&compile(SHAPES), Language::Java, &config).is_empty());
}

#[test_case(Language::Java, 3 ; "java")]
#[test_case(Language::Rust, 1 ; "rust")]
fn hints___enabled___returns_sections(language: Language, sections: usize) {
    let found = hints(&compile(SHAPES), language, &GeneratorConfig::default());

    assert_eq!(found.len(), sections);
}

#[test]
fn generate___writes_units_then_reports_unchanged_on_rerun() {
    let dir = TempDir::new().unwrap();
    let compiled = compile(SHAPES);
    let config = GeneratorConfig::default();

    let first = generate(&compiled, Language::Java, &config, dir.path()).unwrap();
    let second = generate(&compiled, Language::Java, &config, dir.path()).unwrap();

    assert_eq!(first.written.len(), 2);
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged.len(), 2);
    assert!(dir.path().join("com/example/shapes/Shape.java").is_file());
}

#[test]
fn generate___render_failure___writes_nothing() {
    let dir = TempDir::new().unwrap();
    let compiled = compile(
        r#"
classes:
  - name: Good
    fields:
      - { name: id, type: int32 }
  - name: Bad
    fields:
      - { name: class, type: int32 }
"#,
    );

    let err = generate(&compiled, Language::Java, &GeneratorConfig::default(), dir.path())
        .unwrap_err();

    assert!(matches!(err, EmissionError::Render { .. }));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
