use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by `QueryBuilder`
///
/// Absent, zero or unsupported field values are never errors; they
/// simply contribute no predicate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryBuilderError {
    #[error("Unknown sort column: {0}")]
    UnknownSortColumn(String),

    #[error("Invalid sort column '{column}': {source}")]
    InvalidSortColumn {
        column: String,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid sort direction in '{0}': expected asc or desc")]
    InvalidSortDirection(String),

    #[error("build_count called before build")]
    NotBuilt,
}

/// Errors returned while decoding request parameters into a filter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Invalid value '{value}' for parameter '{param}': expected {expected}")]
    InvalidValue {
        param: String,
        value: String,
        expected: &'static str,
    },
}

impl ParamError {
    pub fn invalid(param: &str, value: &str, expected: &'static str) -> Self {
        Self::InvalidValue {
            param: param.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}
