#![allow(non_snake_case)]

use super::*;
use std::fs;
use tempfile::TempDir;
use test_case::test_case;

// ============================================================================
// Language
// ============================================================================

#[test_case("java", Language::Java ; "java")]
#[test_case("rust", Language::Rust ; "rust")]
#[test_case("Java", Language::Java ; "mixed case")]
fn Language___from_str___accepts_known_names(text: &str, expected: Language) {
    assert_eq!(text.parse::<Language>().unwrap(), expected);
}

#[test]
fn Language___from_str_unknown___returns_unsupported_language() {
    let err = "kotlin".parse::<Language>().unwrap_err();

    assert!(matches!(err, EmissionError::UnsupportedLanguage(ref name) if name == "kotlin"));
}

// ============================================================================
// GeneratorConfig
// ============================================================================

#[test]
fn GeneratorConfig___empty_text___returns_defaults() {
    let config = GeneratorConfig::from_toml_str("").unwrap();

    assert_eq!(config, GeneratorConfig::default());
    assert!(config.java.hints);
    assert!(config.rust.emit_mod);
    assert_eq!(config.rust.runtime_crate, "compactgen_runtime");
}

#[test]
fn GeneratorConfig___full_document___parses_every_section() {
    let text = r#"
        [generator]
        language = "rust"
        output_dir = "generated"

        [java]
        hints = false

        [rust]
        runtime_crate = "::my_runtime"
        emit_mod = false

        [rust.externals]
        "com.example.money.Money" = "crate::money::Money"
    "#;

    let config = GeneratorConfig::from_toml_str(text).unwrap();

    assert_eq!(config.generator.language, Some(Language::Rust));
    assert_eq!(config.generator.output_dir, Some(PathBuf::from("generated")));
    assert!(!config.java.hints);
    assert_eq!(config.rust.runtime_crate, "::my_runtime");
    assert!(!config.rust.emit_mod);
    assert_eq!(
        config.rust.externals.get("com.example.money.Money").map(String::as_str),
        Some("crate::money::Money")
    );
}

#[test]
fn GeneratorConfig___unknown_key___returns_config_error() {
    let err = GeneratorConfig::from_toml_str("[java]\npackage = \"x\"\n").unwrap_err();

    assert!(matches!(err, EmissionError::Config(_)));
}

#[test]
fn GeneratorConfig___unknown_language___returns_config_error() {
    let err = GeneratorConfig::from_toml_str("[generator]\nlanguage = \"go\"\n").unwrap_err();

    assert!(matches!(err, EmissionError::Config(_)));
}

#[test]
fn GeneratorConfig___load___resolves_output_dir_against_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("compactgen.toml");
    fs::write(&path, "[generator]\noutput_dir = \"out\"\n").unwrap();

    let config = GeneratorConfig::load(&path).unwrap();

    assert_eq!(config.generator.output_dir, Some(dir.path().join("out")));
}

#[test]
fn GeneratorConfig___load_missing_file___returns_config_error() {
    let dir = TempDir::new().unwrap();

    let err = GeneratorConfig::load(&dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, EmissionError::Config(_)));
}

#[test]
fn GeneratorConfig___load_invalid_toml___names_file_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("compactgen.toml");
    fs::write(&path, "[rust]\nemit_mod = \"sometimes\"\n").unwrap();

    let message = GeneratorConfig::load(&path).unwrap_err().to_string();

    assert!(message.starts_with(&format!("invalid generator configuration: {}: ", path.display())));
    assert_eq!(message.matches("invalid generator configuration").count(), 1);
}
