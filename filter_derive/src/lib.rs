//! Procedural macros for generating filter metadata
//!
//! This crate provides the `FilterParams` derive, which replaces runtime
//! reflection over a filter struct with a table generated at compile time.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod codegen;
mod parsing;

use codegen::generate_filter_params_impl;
use parsing::{parse_field_attributes, parse_struct_attributes, sortable_columns};

/// Derive macro for the FilterParams trait
///
/// The struct must implement `Default`; decoding starts from the default
/// value and overwrites the fields present in the request.
///
/// ```rust,ignore
/// use filter_derive::FilterParams;
///
/// #[derive(Debug, Default, FilterParams)]
/// #[filter(sortable = "name, created_at")]
/// pub struct GetUserParam {
///     #[filter(param = "name", db = "name")]
///     pub name: String,
///
///     #[filter(param = "status", db = "status")]
///     pub status: Vec<String>,
///
///     #[filter(param = "created_at__gte", db = "created_at")]
///     pub created_from: DateTime<Utc>,
///
///     #[filter(param = "role", db = "roles", json_key = "$[0]")]
///     pub role: Option<String>,
///
///     #[filter(param = "page")]
///     pub page: i64,
///
///     #[filter(param = "limit")]
///     pub limit: i64,
///
///     #[filter(param = "sortBy")]
///     pub sort_by: Vec<String>,
/// }
/// ```
#[proc_macro_derive(FilterParams, attributes(filter))]
pub fn derive_filter_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let filter_info = match parse_struct_attributes(&input.attrs) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let fields = match parse_field_attributes(&input.data) {
        Ok(fields) => fields,
        Err(e) => return e.to_compile_error().into(),
    };

    let sortable = sortable_columns(&filter_info, &fields);

    let expanded = generate_filter_params_impl(name, &input.generics, &fields, &sortable);

    TokenStream::from(expanded)
}
