use heck::ToPascalCase;

use crate::parse::spec::Swagger;

/// Suffix appended to derived class names, and the whole name when the
/// title yields nothing usable.
pub const CLASS_NAME_SUFFIX: &str = "RestDslRoutes";

/// Package used when the spec has no usable host.
pub const DEFAULT_PACKAGE_NAME: &str = "rest.dsl.generated";

/// Java keywords and literals that cannot be used as identifiers.
const JAVA_RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while", "_",
];

/// Derive a Java class name from the spec title.
///
/// Examples:
/// - `Swagger Petstore` → `SwaggerPetstoreRestDslRoutes`
/// - `pet-store api` → `PetStoreApiRestDslRoutes`
/// - `3D printer` or no title → `RestDslRoutes`
pub fn class_name_for(spec: &Swagger) -> String {
    let Some(title) = spec.title() else {
        return CLASS_NAME_SUFFIX.to_string();
    };

    let stem = strip_non_identifier(title).to_pascal_case();
    match stem.chars().next() {
        Some(c) if is_identifier_start(c) => format!("{stem}{CLASS_NAME_SUFFIX}"),
        _ => CLASS_NAME_SUFFIX.to_string(),
    }
}

/// Derive a Java package from the spec host by reversing its labels.
///
/// Examples:
/// - `petstore.swagger.io` → `io.swagger.petstore`
/// - `api.example.com:8443` → `com.example.api`
/// - `new.int.example.com` → `com.example.int_.new_`
/// - `localhost:8080` or no host → `rest.dsl.generated`
pub fn package_name_for(spec: &Swagger) -> String {
    let host = spec
        .host
        .as_deref()
        .map(|h| h.split(':').next().unwrap_or_default().trim())
        .filter(|h| !h.is_empty() && !h.eq_ignore_ascii_case("localhost"));

    let Some(host) = host else {
        return DEFAULT_PACKAGE_NAME.to_string();
    };

    let labels: Vec<String> = host
        .rsplit('.')
        .map(|label| {
            let mut segment = strip_non_identifier(label).replace(' ', "_");
            if segment.starts_with(|c: char| c.is_ascii_digit()) {
                segment.insert(0, '_');
            }
            let mut segment = segment.to_lowercase();
            if is_reserved(&segment) {
                segment.push('_');
            }
            segment
        })
        .filter(|label| !label.is_empty())
        .collect();

    if labels.is_empty() {
        DEFAULT_PACKAGE_NAME.to_string()
    } else {
        labels.join(".")
    }
}

/// Whether `name` is a usable (ASCII) Java identifier that is not reserved.
pub fn is_identifier(name: &str) -> bool {
    if is_reserved(name) {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => chars.all(is_identifier_part),
        _ => false,
    }
}

/// Whether `name` is a dotted sequence of identifiers.
pub fn is_qualified_name(name: &str) -> bool {
    name.split('.').all(is_identifier)
}

fn is_reserved(name: &str) -> bool {
    JAVA_RESERVED.contains(&name)
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

/// Replace runs of non-identifier characters with a single space so word
/// boundaries survive for case conversion.
fn strip_non_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for ch in name.chars() {
        if is_identifier_part(ch) {
            if prev_was_separator && !result.is_empty() {
                result.push(' ');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    result
}
