//! Trait definitions
//!
//! This module defines the field descriptor table that stands in for
//! runtime reflection over a filter struct.

use crate::errors::ParamError;
use crate::params::ParamMap;
use type_mapping::{FieldKind, FieldValue};

/// Reserved param name carrying the 1-based page number
pub const PAGE_PARAM: &str = "page";
/// Reserved param name carrying the page size
pub const LIMIT_PARAM: &str = "limit";
/// Reserved param name carrying the sort tokens
pub const SORT_BY_PARAM: &str = "sortBy";

/// Static metadata of one filter field, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Rust field name
    pub field: &'static str,
    /// Request parameter name, including any operand suffix
    pub param: &'static str,
    /// Target column; empty or `-` marks the field non-queryable
    pub column: &'static str,
    /// Member path inside a JSON column
    pub json_key: Option<&'static str>,
    /// `None` for declared types the registry does not know
    pub kind: Option<FieldKind>,
}

impl FieldDescriptor {
    /// Whether the field can never become a predicate
    pub fn is_empty(&self) -> bool {
        self.param.is_empty() || self.param == "-" || self.column.is_empty() || self.column == "-"
    }

    /// Whether the field takes part in request parameter decoding
    pub fn has_param(&self) -> bool {
        !self.param.is_empty() && self.param != "-"
    }
}

/// Metadata and accessors for a filter struct
/// This trait should be derived with `#[derive(FilterParams)]`:
///
/// ```ignore
/// use filter_derive::FilterParams;
///
/// #[derive(Debug, Default, FilterParams)]
/// #[filter(sortable = "name, created_at")]
/// pub struct GetUserParam {
///     #[filter(param = "email", db = "email")]
///     pub email: Option<String>,
///
///     #[filter(param = "age__gte", db = "age")]
///     pub min_age: i64,
///
///     #[filter(param = "page")]
///     pub page: i64,
///     #[filter(param = "limit")]
///     pub limit: i64,
///     #[filter(param = "sortBy")]
///     pub sort_by: Vec<String>,
/// }
/// ```
pub trait FilterParams {
    /// One descriptor per named field, in declaration order
    fn descriptors() -> &'static [FieldDescriptor];

    /// Current values, index-aligned with `descriptors()`
    fn field_values(&self) -> Vec<FieldValue>;

    /// Columns accepted in `sortBy` tokens
    fn sortable_columns() -> &'static [&'static str];

    /// Decode request parameters; unknown keys are ignored
    fn from_params(params: &ParamMap) -> Result<Self, ParamError>
    where
        Self: Sized;

    /// Encode back to request parameters
    fn to_params(&self) -> ParamMap;
}
