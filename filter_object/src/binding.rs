//! Argument binding for sqlx MySQL queries
//!
//! Binds built arguments in order, one per `?` placeholder.

use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::{QueryAs, QueryScalar};
use type_mapping::SqlValue;

// Shared binding logic for every sqlx query kind
macro_rules! bind_sql_value {
    ($query:expr, $value:expr) => {
        match $value {
            SqlValue::Text(v) => $query.bind(v),
            SqlValue::Int32(v) => $query.bind(v),
            SqlValue::Int(v) => $query.bind(v),
            SqlValue::Float32(v) => $query.bind(v),
            SqlValue::Float(v) => $query.bind(v),
            SqlValue::Bool(v) => $query.bind(v),
            SqlValue::Timestamp(v) => $query.bind(v),
        }
    };
}

/// Bind arguments to a query that maps rows with `FromRow`
pub fn bind_query_as<'q, R>(
    mut query: QueryAs<'q, MySql, R, MySqlArguments>,
    args: Vec<SqlValue>,
) -> QueryAs<'q, MySql, R, MySqlArguments> {
    for value in args {
        query = bind_sql_value!(query, value);
    }
    query
}

/// Bind arguments to a query returning a single column, e.g. a count
pub fn bind_query_scalar<'q, O>(
    mut query: QueryScalar<'q, MySql, O, MySqlArguments>,
    args: Vec<SqlValue>,
) -> QueryScalar<'q, MySql, O, MySqlArguments> {
    for value in args {
        query = bind_sql_value!(query, value);
    }
    query
}
