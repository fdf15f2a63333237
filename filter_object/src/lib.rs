//! Filter Object - struct-to-SQL predicate building for qbuilder
//!
//! This crate provides the field cursor, the query builder, the request
//! param codec and the sqlx binding helpers used by filter structs that
//! derive `FilterParams`.

// Lets `#[derive(FilterParams)]` output resolve inside this crate's own tests
extern crate self as filter_object;

pub mod binding;
pub mod errors;
pub mod params;
pub mod prelude;
pub mod query_builder;
pub mod traits;
pub mod validation;

pub use errors::{ParamError, QueryBuilderError};
pub use params::{insert_param, parse_timestamp, ParamMap, ParamValue};
pub use query_builder::{
    validate_page_and_limit, BuildOptions, Clause, ClauseForm, FieldCursor, Operand, PageWindow,
    Pagination, PredicateProducer, QueryBuilder, SortOrder,
};
pub use traits::*;
pub use type_mapping::{FieldKind, FieldValue, SqlValue, ToFieldValue};
pub use validation::{ValidatedColumnName, ValidationError};
