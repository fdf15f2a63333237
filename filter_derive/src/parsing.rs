//! Parsing utilities for `#[filter(...)]` attributes
//!
//! This module handles the parsing of struct and field attributes and the
//! compile-time validation of column names and JSON member paths.

use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, Attribute, Data, Error, Fields, Ident, LitStr, Result,
    Token, Type,
};
use type_mapping::{rust_type_to_field_kind, FieldKind};

const FIELD_KEYS: &[&str] = &["param", "db", "json_key"];
const STRUCT_KEYS: &[&str] = &["sortable"];

/// Validate a column name and return syn::Error for better proc macro error handling
pub fn validate_column_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    if name.is_empty() {
        return Err(Error::new(span, "Invalid column name '': Name cannot be empty"));
    }
    for segment in name.split('.') {
        validate_identifier(segment)
            .map_err(|e| Error::new(span, format!("Invalid column name '{}': {}", name, e)))?;
    }
    Ok(())
}

/// Validate a JSON member path such as `$[0]`, `$.address.city` or `city`
pub fn validate_json_key_syn(key: &str, span: proc_macro2::Span) -> Result<()> {
    if key.is_empty() {
        return Err(Error::new(span, "json_key cannot be empty"));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '$' | '.' | '[' | ']' | '*' | '_');
    if !key.chars().all(allowed) {
        return Err(Error::new(
            span,
            format!(
                "Invalid json_key '{}': only alphanumerics and `$ . [ ] * _` are allowed",
                key
            ),
        ));
    }
    Ok(())
}

/// Validation logic that mirrors filter_object::validation
/// This ensures compile-time validation matches runtime validation
fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    // MySQL identifier limit
    if name.len() > 64 {
        return Err(format!(
            "Name '{}' is too long: {} characters (max 64)",
            name,
            name.len()
        ));
    }

    let first_char = name
        .chars()
        .next()
        .ok_or_else(|| "Name cannot be empty".to_string())?;
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(format!(
            "Name '{}' must start with a letter or underscore",
            name
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Name '{}' contains invalid characters: only alphanumeric characters and underscores are allowed", name));
    }

    if is_reserved_keyword(name) {
        return Err(format!("Name '{}' is a reserved SQL keyword", name));
    }

    Ok(())
}

/// Same list as filter_object::validation
fn is_reserved_keyword(name: &str) -> bool {
    const RESERVED_KEYWORDS: &[&str] = &[
        "SELECT", "INSERT", "UPDATE", "DELETE", "FROM", "WHERE", "JOIN", "INNER", "LEFT", "RIGHT",
        "OUTER", "CROSS", "ON", "AS", "AND", "OR", "NOT", "NULL", "TRUE", "FALSE", "CASE", "WHEN",
        "THEN", "ELSE", "END", "EXISTS", "IN", "IS", "LIKE", "BETWEEN", "ORDER", "BY", "GROUP",
        "HAVING", "LIMIT", "OFFSET", "UNION", "ALL", "DISTINCT", "ASC", "DESC", "CREATE", "DROP",
        "ALTER", "TABLE", "INTO", "VALUES", "SET",
    ];

    RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}

/// `key = "value"` pairs inside `#[filter(...)]`
struct FilterArgs {
    pairs: Vec<(Ident, LitStr)>,
}

impl Parse for FilterArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut pairs = Vec::new();

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            let _: Token![=] = input.parse()?;
            let value: LitStr = input.parse()?;
            pairs.push((key, value));

            if input.peek(Token![,]) {
                let _: Token![,] = input.parse()?;
            }
        }

        Ok(FilterArgs { pairs })
    }
}

/// Collect the pairs of every `#[filter(...)]` attribute, rejecting unknown keys
fn parse_filter_args(attrs: &[Attribute], known: &[&str]) -> Result<Vec<(Ident, LitStr)>> {
    let mut pairs: Vec<(Ident, LitStr)> = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("filter") {
            continue;
        }
        let args: FilterArgs = attr.parse_args()?;
        for (key, value) in args.pairs {
            let key_str = key.to_string();
            if !known.contains(&key_str.as_str()) {
                return Err(Error::new(
                    key.span(),
                    format!(
                        "unknown filter attribute key `{}`, expected one of: {}",
                        key_str,
                        known.join(", ")
                    ),
                ));
            }
            if pairs.iter().any(|(k, _)| *k == key) {
                return Err(Error::new(
                    key.span(),
                    format!("duplicate filter attribute key `{}`", key_str),
                ));
            }
            pairs.push((key, value));
        }
    }

    Ok(pairs)
}

fn lookup(pairs: &[(Ident, LitStr)], key: &str) -> Option<LitStr> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

#[derive(Debug)]
pub struct FilterInfo {
    /// Declared with `#[filter(sortable = "...")]`
    pub sortable: Option<Vec<String>>,
}

pub struct FilterField {
    pub ident: Ident,
    pub ty: Type,
    pub param: String,
    pub column: String,
    pub json_key: Option<String>,
    /// `None` for types the registry does not know
    pub kind: Option<FieldKind>,
}

impl FilterField {
    pub fn has_param(&self) -> bool {
        !self.param.is_empty() && self.param != "-"
    }

    pub fn has_column(&self) -> bool {
        !self.column.is_empty() && self.column != "-"
    }
}

pub fn parse_struct_attributes(attrs: &[Attribute]) -> Result<FilterInfo> {
    let pairs = parse_filter_args(attrs, STRUCT_KEYS)?;

    let sortable = match lookup(&pairs, "sortable") {
        Some(lit) => {
            let columns: Vec<String> = lit
                .value()
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
            for column in &columns {
                validate_column_syn(column, lit.span())?;
            }
            Some(columns)
        }
        None => None,
    };

    Ok(FilterInfo { sortable })
}

pub fn parse_field_attributes(data: &Data) -> Result<Vec<FilterField>> {
    if let Data::Struct(data_struct) = data {
        if let Fields::Named(fields_named) = &data_struct.fields {
            let mut parsed: Vec<FilterField> = Vec::new();

            for field in &fields_named.named {
                let ident = field
                    .ident
                    .clone()
                    .ok_or_else(|| Error::new_spanned(field, "Field must have a name"))?;
                let pairs = parse_filter_args(&field.attrs, FIELD_KEYS)?;

                let param = lookup(&pairs, "param").map(|l| l.value()).unwrap_or_default();
                let column = match lookup(&pairs, "db") {
                    Some(lit) => {
                        let column = lit.value();
                        if !column.is_empty() && column != "-" {
                            validate_column_syn(&column, lit.span())?;
                        }
                        column
                    }
                    None => String::new(),
                };
                let json_key = match lookup(&pairs, "json_key") {
                    Some(lit) => {
                        validate_json_key_syn(&lit.value(), lit.span())?;
                        Some(lit.value())
                    }
                    None => None,
                };

                let ty = &field.ty;
                let type_string = quote!(#ty).to_string();
                let kind = rust_type_to_field_kind(&type_string);

                let filter_field = FilterField {
                    ident,
                    ty: field.ty.clone(),
                    param,
                    column,
                    json_key,
                    kind,
                };

                if filter_field.has_param()
                    && parsed
                        .iter()
                        .any(|f| f.has_param() && f.param == filter_field.param)
                {
                    return Err(Error::new_spanned(
                        field,
                        format!("duplicate filter param `{}`", filter_field.param),
                    ));
                }

                parsed.push(filter_field);
            }

            return Ok(parsed);
        }
    }

    Err(Error::new(
        proc_macro2::Span::call_site(),
        "FilterParams can only be derived for structs with named fields",
    ))
}

/// The sort allow-list: declared columns, or every queryable column
pub fn sortable_columns(info: &FilterInfo, fields: &[FilterField]) -> Vec<String> {
    if let Some(columns) = &info.sortable {
        return columns.clone();
    }

    let mut columns: Vec<String> = Vec::new();
    for field in fields.iter().filter(|f| f.has_column()) {
        if !columns.contains(&field.column) {
            columns.push(field.column.clone());
        }
    }
    columns
}
