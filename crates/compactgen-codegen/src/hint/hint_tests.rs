#![allow(non_snake_case)]

use super::*;
use compactgen_core::{Schema, SourceFormat, parse_schema};
use std::path::Path;

fn compile(yaml: &str) -> CompiledSchema {
    let schema = parse_schema(yaml, SourceFormat::Yaml, Path::new(".")).unwrap();
    CompiledSchema::compile(&schema).unwrap()
}

const EXAMPLES: &str = r#"
namespace: com.example
classes:
  - name: Example1
    fields:
      - { name: example, type: Example2 }
      - { name: bar, type: com.x.y.z.SomeExternalClass }
  - name: Example2
    fields:
      - { name: id, type: int64 }
"#;

#[test]
fn HintSection___display___prints_banner_then_body() {
    let section = HintSection::new("Title", "body\n");

    assert_eq!(section.to_string(), "---------Title---------\n\nbody\n");
}

// ============================================================================
// Java
// ============================================================================

#[test]
fn java_hints___examples___three_sections_in_emission_order() {
    let hints = java_hints(&compile(EXAMPLES));

    let headers: Vec<&str> = hints.iter().map(|h| h.header.as_str()).collect();
    assert_eq!(
        headers,
        vec![
            "Programmatic configuration",
            "Declarative XML configuration",
            "Declarative YAML configuration",
        ]
    );
    assert_eq!(
        hints[0].body,
        "compactSerializationConfig.setSerializers(\n\
         \tnew com.example.Example2.Serializer(),\n\
         \tnew com.example.Example1.Serializer()\n\
         );\n"
    );
}

#[test]
fn java_hints___xml___one_serializer_element_per_class() {
    let hints = java_hints(&compile(EXAMPLES));

    assert_eq!(
        hints[1].body,
        "<serialization>\n\
         \t<compact-serialization>\n\
         \t\t<serializers>\n\
         \t\t\t<serializer>\n\
         \t\t\t\tcom.example.Example2\n\
         \t\t\t</serializer>\n\
         \t\t\t<serializer>\n\
         \t\t\t\tcom.example.Example1\n\
         \t\t\t</serializer>\n\
         \t\t</serializers>\n\
         \t</compact-serialization>\n\
         </serialization>\n"
    );
}

#[test]
fn java_hints___yaml___lists_classes() {
    let hints = java_hints(&compile(EXAMPLES));

    assert_eq!(
        hints[2].body,
        "serialization:\n\
         \tcompact-serialization:\n\
         \t\tserializers:\n\
         \t\t\t- serializer: com.example.Example2\n\
         \t\t\t- serializer: com.example.Example1\n"
    );
}

#[test]
fn java_hints___external_types___not_listed() {
    let hints = java_hints(&compile(EXAMPLES));

    assert!(hints.iter().all(|h| !h.body.contains("SomeExternalClass")));
}

#[test]
fn java_hints___empty_schema___no_sections() {
    let compiled = CompiledSchema::compile(&Schema::new()).unwrap();

    assert!(java_hints(&compiled).is_empty());
}

// ============================================================================
// Rust
// ============================================================================

#[test]
fn rust_hints___examples___registry_setup_with_externals_first() {
    let hints = rust_hints(&compile(EXAMPLES), &RustConfig::default());

    assert_eq!(hints.len(), 1);
    assert_eq!(hints[0].header, "Registry setup");
    assert_eq!(
        hints[0].body,
        "let mut registry = compactgen_runtime::SerializerRegistry::new();\n\
         registry.register(/* serializer for crate::com::x::y::z::SomeExternalClass (com.x.y.z.SomeExternalClass) */)?;\n\
         generated::register_all(&mut registry)?;\n"
    );
}

#[test]
fn rust_hints___configured_external___uses_configured_path() {
    let mut config = RustConfig::default();
    config.externals.insert(
        "com.x.y.z.SomeExternalClass".to_string(),
        "crate::money::Money".to_string(),
    );

    let hints = rust_hints(&compile(EXAMPLES), &config);

    assert!(hints[0].body.contains("serializer for crate::money::Money"));
}

#[test]
fn rust_hints___empty_schema___no_sections() {
    let compiled = CompiledSchema::compile(&Schema::new()).unwrap();

    assert!(rust_hints(&compiled, &RustConfig::default()).is_empty());
}
