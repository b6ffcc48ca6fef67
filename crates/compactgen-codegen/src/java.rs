//! Java class generation for compact types.
//!
//! Each non-external type becomes one immutable class with a nested
//! `Serializer implements CompactSerializer<T>`, written to
//! `<package path>/<Name>.java`.

use crate::error::{EmissionError, EmissionResult};
use crate::jvm_types::map_kind;
use crate::naming::{capitalize, is_java_identifier};
use crate::output::GeneratedUnit;
use compactgen_core::{
    CompiledSchema, DefaultValue, FieldType, Fingerprint, PrimitiveKind, ResolvedField,
    ResolvedType, TypeId,
};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;
use tracing::debug;

/// Simple names already taken by the class template or `java.lang`.
const RESERVED_NAMES: &[&str] = &[
    "Arrays",
    "Boolean",
    "Byte",
    "Class",
    "CompactReader",
    "CompactSerializer",
    "CompactWriter",
    "Double",
    "Float",
    "Integer",
    "LocalDate",
    "LocalDateTime",
    "LocalTime",
    "Long",
    "Nonnull",
    "Object",
    "Objects",
    "OffsetDateTime",
    "Override",
    "Serializer",
    "Short",
    "String",
];

/// Generate one Java class per emitted type, in emission order.
pub fn generate_java(compiled: &CompiledSchema) -> EmissionResult<Vec<GeneratedUnit>> {
    compiled
        .emitted()
        .map(|(def, fingerprint)| {
            let code = JavaClass::new(compiled, def, fingerprint)?.render();
            debug!(type_name = %def.name, "rendered java class");
            Ok(GeneratedUnit::new(java_path(def), code))
        })
        .collect()
}

/// Every dot-separated segment of `namespace` must be a Java identifier.
fn check_package(type_name: &str, namespace: &str) -> EmissionResult<()> {
    match namespace.split('.').find(|segment| !is_java_identifier(segment)) {
        Some(segment) => Err(EmissionError::render(
            type_name,
            format!("package `{namespace}` has invalid segment `{segment}`"),
        )),
        None => Ok(()),
    }
}

/// `com/example/Example1.java` for `com.example.Example1`.
pub fn java_path(def: &ResolvedType) -> PathBuf {
    let mut path = PathBuf::new();
    if let Some(namespace) = def.name.namespace() {
        path.extend(namespace.split('.'));
    }
    path.push(format!("{}.java", def.name.name()));
    path
}

struct JavaClass<'a> {
    compiled: &'a CompiledSchema,
    def: &'a ResolvedType,
    fingerprint: Fingerprint,
    /// Referenced simple names that must be written fully qualified.
    qualified: HashSet<String>,
    imports: BTreeSet<String>,
}

impl<'a> JavaClass<'a> {
    fn new(
        compiled: &'a CompiledSchema,
        def: &'a ResolvedType,
        fingerprint: Fingerprint,
    ) -> EmissionResult<Self> {
        let type_name = def.qualified_name();
        if !is_java_identifier(def.name.name()) {
            return Err(EmissionError::render(
                type_name,
                format!("`{}` is not a valid Java class name", def.name.name()),
            ));
        }
        if RESERVED_NAMES.contains(&def.name.name()) {
            return Err(EmissionError::render(
                type_name,
                format!(
                    "class name `{}` shadows a type used by the generated code",
                    def.name.name()
                ),
            ));
        }
        if let Some(namespace) = def.name.namespace() {
            check_package(&type_name, namespace)?;
        }
        if let Some(field) = def.fields.iter().find(|f| !is_java_identifier(&f.name)) {
            return Err(EmissionError::render(
                type_name,
                format!("field `{}` is not a valid Java identifier", field.name),
            ));
        }

        let mut referenced: Vec<TypeId> = Vec::new();
        for id in def.fields.iter().filter_map(|f| f.ty.compact_ref()) {
            if !referenced.contains(id) {
                referenced.push(*id);
            }
        }

        for id in &referenced {
            let target = compiled.get(*id);
            let qualified_name = target.qualified_name();
            if let Some(namespace) = target.name.namespace() {
                check_package(&type_name, namespace)?;
            }
            if !is_java_identifier(target.name.name()) {
                return Err(EmissionError::render(
                    type_name,
                    format!("referenced type `{qualified_name}` is not a valid Java name"),
                ));
            }
            if target.name.namespace() == def.name.namespace()
                && RESERVED_NAMES.contains(&target.name.name())
            {
                return Err(EmissionError::render(
                    type_name,
                    format!(
                        "same-package type `{qualified_name}` shadows a type used by the generated code"
                    ),
                ));
            }
        }

        let mut by_simple_name: HashMap<&str, HashSet<String>> = HashMap::new();
        by_simple_name
            .entry(def.name.name())
            .or_default()
            .insert(type_name.clone());
        for id in &referenced {
            let target = compiled.get(*id);
            by_simple_name
                .entry(target.name.name())
                .or_default()
                .insert(target.qualified_name());
        }

        let mut qualified = HashSet::new();
        let mut imports = BTreeSet::new();
        for id in &referenced {
            let target = compiled.get(*id);
            let Some(namespace) = target.name.namespace() else {
                continue;
            };
            if Some(namespace) == def.name.namespace() {
                continue;
            }
            let simple = target.name.name();
            let clashes = RESERVED_NAMES.contains(&simple)
                || by_simple_name.get(simple).is_some_and(|names| names.len() > 1);
            if clashes {
                qualified.insert(simple.to_string());
            } else {
                imports.insert(target.qualified_name());
            }
        }

        for field in &def.fields {
            if let Some(import) = field.ty.element().primitive_kind().and_then(|k| map_kind(k).import) {
                imports.insert(import.to_string());
            }
        }

        Ok(Self {
            compiled,
            def,
            fingerprint,
            qualified,
            imports,
        })
    }

    fn name(&self) -> &str {
        self.def.name.name()
    }

    /// How this class refers to another type.
    fn reference(&self, id: TypeId) -> String {
        let target = self.compiled.get(id);
        if self.qualified.contains(target.name.name()) {
            target.qualified_name()
        } else {
            target.name.name().to_string()
        }
    }

    fn java_type(&self, ty: &FieldType<TypeId>) -> String {
        match ty {
            FieldType::Primitive(kind) => map_kind(*kind).java_type(false).to_string(),
            FieldType::NullablePrimitive(kind) => map_kind(*kind).java_type(true).to_string(),
            FieldType::Array(element) => format!("{}[]", self.java_type(element)),
            FieldType::Compact(id) => self.reference(*id),
        }
    }

    fn render(&self) -> String {
        let mut code = String::new();

        self.render_header(&mut code);

        code.push_str(&format!("public class {} {{\n\n", self.name()));
        self.render_serializer(&mut code);

        // Fields
        code.push('\n');
        for field in &self.def.fields {
            code.push_str(&format!(
                "    private final {} {};\n",
                self.java_type(&field.ty),
                field.name
            ));
        }
        if !self.def.fields.is_empty() {
            code.push('\n');
        }

        self.render_constructor(&mut code);

        // Getters
        for field in &self.def.fields {
            code.push_str(&format!(
                "    public {} get{}() {{\n",
                self.java_type(&field.ty),
                capitalize(&field.name)
            ));
            code.push_str(&format!("        return {};\n", field.name));
            code.push_str("    }\n\n");
        }

        self.render_equals(&mut code);
        self.render_hash_code(&mut code);
        self.render_to_string(&mut code);

        code.push_str("}\n");
        code
    }

    fn render_header(&self, code: &mut String) {
        if let Some(namespace) = self.def.name.namespace() {
            code.push_str(&format!("package {namespace};\n\n"));
        }

        code.push_str("import com.hazelcast.nio.serialization.compact.CompactReader;\n");
        code.push_str("import com.hazelcast.nio.serialization.compact.CompactSerializer;\n");
        code.push_str("import com.hazelcast.nio.serialization.compact.CompactWriter;\n");
        code.push('\n');

        if !self.imports.is_empty() {
            for import in &self.imports {
                code.push_str(&format!("import {import};\n"));
            }
            code.push('\n');
        }

        code.push_str("import javax.annotation.Nonnull;\n");
        code.push_str("import java.util.Arrays;\n");
        code.push_str("import java.util.Objects;\n\n");
    }

    fn render_serializer(&self, code: &mut String) {
        let name = self.name();

        code.push_str(&format!(
            "    public static final class Serializer implements CompactSerializer<{name}> {{\n"
        ));

        // read
        code.push_str("        @Nonnull\n");
        code.push_str("        @Override\n");
        code.push_str(&format!(
            "        public {name} read(@Nonnull CompactReader reader) {{\n"
        ));
        if self.def.fields.is_empty() {
            code.push_str(&format!("            return new {name}();\n"));
        } else {
            code.push_str(&format!("            return new {name}(\n"));
            let reads: Vec<String> = self
                .def
                .fields
                .iter()
                .map(|field| format!("                    {}", self.read_expr(field)))
                .collect();
            code.push_str(&reads.join(",\n"));
            code.push_str("\n            );\n");
        }
        code.push_str("        }\n\n");

        // write
        code.push_str("        @Override\n");
        code.push_str(&format!(
            "        public void write(@Nonnull CompactWriter writer, @Nonnull {name} object) {{\n"
        ));
        for field in &self.def.fields {
            code.push_str(&format!(
                "            writer.write{}(\"{}\", object.{});\n",
                method_suffix(&field.ty),
                field.name,
                field.name
            ));
        }
        code.push_str("        }\n\n");

        code.push_str("        @Override\n");
        code.push_str(&format!(
            "        public Class<{name}> getCompactClass() {{\n"
        ));
        code.push_str(&format!("            return {name}.class;\n"));
        code.push_str("        }\n\n");

        code.push_str("        @Override\n");
        code.push_str("        public String getTypeName() {\n");
        code.push_str(&format!("            return \"{}\";\n", self.fingerprint));
        code.push_str("        }\n");
        code.push_str("    };\n\n");

        code.push_str(&format!(
            "    public static final CompactSerializer<{name}> HZ_COMPACT_SERIALIZER = new Serializer();\n"
        ));
    }

    fn read_expr(&self, field: &ResolvedField) -> String {
        if let FieldType::Array(element) = &field.ty
            && let FieldType::Compact(id) = element.as_ref()
        {
            return format!(
                "reader.readArrayOfCompact(\"{}\", {}.class)",
                field.name,
                self.reference(*id)
            );
        }
        match field.default {
            Some(default) => format!(
                "reader.read{}(\"{}\", {})",
                method_suffix(&field.ty),
                field.name,
                java_literal(default)
            ),
            None => format!(
                "reader.read{}(\"{}\")",
                method_suffix(&field.ty),
                field.name
            ),
        }
    }

    fn render_constructor(&self, code: &mut String) {
        let params: Vec<String> = self
            .def
            .fields
            .iter()
            .map(|field| format!("{} {}", self.java_type(&field.ty), field.name))
            .collect();

        code.push_str(&format!(
            "    public {}({}) {{\n",
            self.name(),
            params.join(", ")
        ));
        for field in &self.def.fields {
            code.push_str(&format!("        this.{0} = {0};\n", field.name));
        }
        code.push_str("    }\n\n");
    }

    fn render_equals(&self, code: &mut String) {
        let name = self.name();

        code.push_str("    @Override\n");
        code.push_str("    public boolean equals(Object o) {\n");
        code.push_str("        if (this == o) return true;\n");
        code.push_str("        if (o == null || getClass() != o.getClass()) return false;\n\n");
        code.push_str(&format!("        {name} that = ({name}) o;\n"));
        for field in &self.def.fields {
            let f = &field.name;
            let check = match field.ty {
                FieldType::Primitive(PrimitiveKind::Float32) => {
                    format!("Float.compare(this.{f}, that.{f}) != 0")
                }
                FieldType::Primitive(PrimitiveKind::Float64) => {
                    format!("Double.compare(this.{f}, that.{f}) != 0")
                }
                FieldType::Primitive(kind) if kind.is_fixed_size() => {
                    format!("this.{f} != that.{f}")
                }
                FieldType::Array(_) => format!("!Arrays.equals(this.{f}, that.{f})"),
                _ => format!("!Objects.equals(this.{f}, that.{f})"),
            };
            code.push_str(&format!("        if ({check}) return false;\n"));
        }
        code.push_str("\n        return true;\n");
        code.push_str("    }\n\n");
    }

    fn render_hash_code(&self, code: &mut String) {
        code.push_str("    @Override\n");
        code.push_str("    public int hashCode() {\n");
        code.push_str("        int result = 0;\n");

        let mut temp_declared = false;
        for field in &self.def.fields {
            let f = &field.name;
            match field.ty {
                FieldType::Primitive(PrimitiveKind::Boolean) => code.push_str(&format!(
                    "        result = 31 * result + (this.{f} ? 1 : 0);\n"
                )),
                FieldType::Primitive(PrimitiveKind::Int64) => code.push_str(&format!(
                    "        result = 31 * result + (int) (this.{f} ^ (this.{f} >>> 32));\n"
                )),
                FieldType::Primitive(PrimitiveKind::Float32) => code.push_str(&format!(
                    "        result = 31 * result + (this.{f} != +0.0f ? Float.floatToIntBits(this.{f}) : 0);\n"
                )),
                FieldType::Primitive(PrimitiveKind::Float64) => {
                    if !temp_declared {
                        code.push_str("        long temp;\n");
                        temp_declared = true;
                    }
                    code.push_str(&format!(
                        "        temp = this.{f} != +0.0d ? Double.doubleToLongBits(this.{f}) : 0L;\n"
                    ));
                    code.push_str("        result = 31 * result + (int) (temp ^ (temp >>> 32));\n");
                }
                FieldType::Primitive(kind) if kind.is_fixed_size() => code.push_str(&format!(
                    "        result = 31 * result + (int) this.{f};\n"
                )),
                FieldType::Array(_) => code.push_str(&format!(
                    "        result = 31 * result + Arrays.hashCode(this.{f});\n"
                )),
                _ => code.push_str(&format!(
                    "        result = 31 * result + Objects.hashCode(this.{f});\n"
                )),
            }
        }

        code.push_str("\n        return result;\n");
        code.push_str("    }\n\n");
    }

    fn render_to_string(&self, code: &mut String) {
        code.push_str("    @Override\n");
        code.push_str("    public String toString() {\n");
        code.push_str(&format!("        return \"<{}> {{\"\n", self.name()));
        for (i, field) in self.def.fields.iter().enumerate() {
            let separator = if i == 0 { "" } else { ", " };
            let value = if field.ty.is_array() {
                format!("Arrays.toString(this.{})", field.name)
            } else {
                format!("this.{}", field.name)
            };
            code.push_str(&format!(
                "                + \"{separator}{}=\" + {value}\n",
                field.name
            ));
        }
        code.push_str("                + '}';\n");
        code.push_str("    }\n\n");
    }
}

/// Reader/writer method suffix: `Int32`, `NullableInt32`, `ArrayOfCompact`, ...
///
/// Variable-size kinds are nullable in Java already, so their nullable
/// forms use the plain methods.
fn method_suffix(ty: &FieldType<TypeId>) -> String {
    match ty {
        FieldType::Primitive(kind) => kind.title().to_string(),
        FieldType::NullablePrimitive(kind) if kind.is_fixed_size() => {
            format!("Nullable{}", kind.title())
        }
        FieldType::NullablePrimitive(kind) => kind.title().to_string(),
        FieldType::Array(element) => format!("ArrayOf{}", method_suffix(element)),
        FieldType::Compact(_) => "Compact".to_string(),
    }
}

fn java_literal(default: DefaultValue) -> String {
    match default {
        DefaultValue::Boolean(v) => v.to_string(),
        DefaultValue::Int8(v) => format!("(byte) {v}"),
        DefaultValue::Int16(v) => format!("(short) {v}"),
        DefaultValue::Int32(v) => v.to_string(),
        DefaultValue::Int64(v) if i32::try_from(v).is_ok() => v.to_string(),
        DefaultValue::Int64(v) => format!("{v}L"),
        DefaultValue::Float32(v) => format!("(float) {v:?}"),
        DefaultValue::Float64(v) => format!("{v:?}"),
    }
}
