//! Registration hints printed after generation

use crate::config::RustConfig;
use crate::rust::external_path;
use compactgen_core::CompiledSchema;
use std::fmt;

/// One titled block of registration instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintSection {
    pub header: String,
    pub body: String,
}

impl HintSection {
    pub fn new(header: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for HintSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "---------{}---------\n\n{}", self.header, self.body)
    }
}

/// Programmatic, XML and YAML registration of the generated Java serializers.
///
/// Empty when nothing was generated.
pub fn java_hints(compiled: &CompiledSchema) -> Vec<HintSection> {
    let classes: Vec<String> = compiled
        .emitted()
        .map(|(def, _)| def.qualified_name())
        .collect();
    if classes.is_empty() {
        return Vec::new();
    }

    let mut programmatic = String::from("compactSerializationConfig.setSerializers(\n");
    let news: Vec<String> = classes
        .iter()
        .map(|class| format!("\tnew {class}.Serializer()"))
        .collect();
    programmatic.push_str(&news.join(",\n"));
    programmatic.push_str("\n);\n");

    let mut xml = String::from("<serialization>\n\t<compact-serialization>\n\t\t<serializers>\n");
    for class in &classes {
        xml.push_str("\t\t\t<serializer>\n");
        xml.push_str(&format!("\t\t\t\t{class}\n"));
        xml.push_str("\t\t\t</serializer>\n");
    }
    xml.push_str("\t\t</serializers>\n\t</compact-serialization>\n</serialization>\n");

    let mut yaml = String::from("serialization:\n\tcompact-serialization:\n\t\tserializers:\n");
    for class in &classes {
        yaml.push_str(&format!("\t\t\t- serializer: {class}\n"));
    }

    vec![
        HintSection::new("Programmatic configuration", programmatic),
        HintSection::new("Declarative XML configuration", xml),
        HintSection::new("Declarative YAML configuration", yaml),
    ]
}

/// How to populate a registry with the generated Rust serializers.
///
/// External types are listed because their serializers are not generated.
pub fn rust_hints(compiled: &CompiledSchema, config: &RustConfig) -> Vec<HintSection> {
    if compiled.identities().is_empty() {
        return Vec::new();
    }

    let mut body = format!(
        "let mut registry = {}::SerializerRegistry::new();\n",
        config.runtime_crate
    );
    for id in compiled.resolved().externals() {
        let name = compiled.get(id).qualified_name();
        let path = external_path(config, &name);
        body.push_str(&format!(
            "registry.register(/* serializer for {path} ({name}) */)?;\n"
        ));
    }
    body.push_str("generated::register_all(&mut registry)?;\n");

    vec![HintSection::new("Registry setup", body)]
}

#[cfg(test)]
#[path = "hint/hint_tests.rs"]
mod hint_tests;
