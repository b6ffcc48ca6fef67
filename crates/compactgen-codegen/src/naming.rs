//! Naming convention utilities for code generation.
//!
//! Schema names are written in Java style (`Example1`, `mByte`). This module
//! converts them into the conventions of each target language.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `word` | [`capitalize`] | `Word` |
//! | `camelCase` | [`to_snake_case`] | `camel_case` |
//! | `com.example.v2` | [`to_module_name`] | `com_example_v2` |
//! | `type` | [`rust_field_name`] | `r#type` |

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use compactgen_codegen::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize("world"), "World");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert camelCase or PascalCase to snake_case.
///
/// Acronyms stay together, and dots and dashes become underscores.
///
/// # Examples
///
/// ```
/// use compactgen_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("displayName"), "display_name");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// assert_eq!(to_snake_case("Example1"), "example1");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '.' || c == '-' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Convert a namespace into a single module-name segment.
///
/// # Examples
///
/// ```
/// use compactgen_codegen::naming::to_module_name;
///
/// assert_eq!(to_module_name("com.example.shapes"), "com_example_shapes");
/// assert_eq!(to_module_name("org.myApp"), "org_my_app");
/// ```
pub fn to_module_name(namespace: &str) -> String {
    namespace
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(to_snake_case)
        .collect::<Vec<_>>()
        .join("_")
}

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Names that cannot be raw identifiers, plus the generated constructor name.
const RUST_SUFFIXED: &[&str] = &["crate", "self", "super", "Self", "new"];

/// Rust field and accessor name for a schema field name.
///
/// # Examples
///
/// ```
/// use compactgen_codegen::naming::rust_field_name;
///
/// assert_eq!(rust_field_name("mByte"), "m_byte");
/// assert_eq!(rust_field_name("type"), "r#type");
/// assert_eq!(rust_field_name("self"), "self_");
/// ```
pub fn rust_field_name(name: &str) -> String {
    let snake = to_snake_case(name);
    if RUST_SUFFIXED.contains(&snake.as_str()) {
        format!("{snake}_")
    } else if RUST_KEYWORDS.contains(&snake.as_str()) {
        format!("r#{snake}")
    } else {
        snake
    }
}

const JAVA_KEYWORDS: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Whether `name` can be used verbatim as a Java identifier.
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
    starts_well
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !JAVA_KEYWORDS.contains(&name)
}
