//! Type registry
//!
//! Maps declared Rust type names to the predicate kind the query builder
//! uses for them. Resolved once per field when the derive macro expands.

/// Predicate kind of a filter field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Temporal,
    MultiValue,
    Nullable,
    ParamOnly,
}

impl FieldKind {
    /// Variant name, used by the derive macro to emit a path to the variant
    pub fn variant_name(&self) -> &'static str {
        match self {
            FieldKind::Scalar => "Scalar",
            FieldKind::Temporal => "Temporal",
            FieldKind::MultiValue => "MultiValue",
            FieldKind::Nullable => "Nullable",
            FieldKind::ParamOnly => "ParamOnly",
        }
    }
}

/// Normalize a type string: strip whitespace and the common path prefixes
pub fn normalize_type(rust_type: &str) -> String {
    let mut normalized: String = rust_type.chars().filter(|c| !c.is_whitespace()).collect();
    for prefix in [
        "::std::option::",
        "std::option::",
        "::std::string::",
        "std::string::",
        "::std::vec::",
        "std::vec::",
        "::chrono::",
        "chrono::",
    ] {
        normalized = normalized.replace(prefix, "");
    }
    normalized
}

/// Map a declared Rust type to its predicate kind, `None` for unsupported types
pub fn rust_type_to_field_kind(rust_type: &str) -> Option<FieldKind> {
    match normalize_type(rust_type).as_str() {
        "String" | "i32" | "i64" | "f32" | "f64" => Some(FieldKind::Scalar),
        "DateTime<Utc>" | "Option<DateTime<Utc>>" => Some(FieldKind::Temporal),
        "Vec<String>" | "Vec<i32>" | "Vec<i64>" | "Vec<f32>" | "Vec<f64>" => {
            Some(FieldKind::MultiValue)
        }
        "Option<String>" | "Option<i32>" | "Option<i64>" | "Option<f64>" | "Option<bool>" => {
            Some(FieldKind::Nullable)
        }
        "bool" => Some(FieldKind::ParamOnly),
        _ => None,
    }
}
