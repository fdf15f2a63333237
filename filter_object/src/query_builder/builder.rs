//! Query builder
//!
//! Walks a filter struct field by field and assembles the predicate,
//! ordering and pagination suffix of a MySQL query. The predicate fragments
//! are captured by `build` so `build_count` replays exactly the same ones.

use config::{PaginationConfig, QueryConfig};
use type_mapping::{FieldValue, SqlValue};

use crate::errors::QueryBuilderError;
use crate::query_builder::cursor::FieldCursor;
use crate::query_builder::ordering::{SortKey, SortOrder};
use crate::query_builder::pagination::PageWindow;
use crate::query_builder::sql_generation::SqlGenerator;
use crate::traits::FilterParams;
use crate::validation::ValidatedColumnName;

/// Options for building queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Fetch one extra row to detect a next page
    pub extra_limit: bool,
}

impl From<QueryConfig> for BuildOptions {
    fn from(config: QueryConfig) -> Self {
        Self {
            extra_limit: config.extra_limit,
        }
    }
}

/// State captured by the last successful `build`
#[derive(Debug, Clone)]
struct BuiltQuery {
    where_clause: String,
    args: Vec<SqlValue>,
    window: Option<PageWindow>,
}

/// Query builder for one filter
///
/// Holds the fragments of its last build, so one instance serves one
/// logical query: `build`, then `build_count`.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    options: BuildOptions,
    pagination: PaginationConfig,
    sortable_columns: Option<Vec<String>>,
    built: Option<BuiltQuery>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request `limit + 1` rows
    pub fn with_extra_limit(mut self) -> Self {
        self.options.extra_limit = true;
        self
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Bounds for the `page` and `limit` fields
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Replace the filter's own sort allow-list
    pub fn with_sortable_columns(mut self, columns: &[&str]) -> Self {
        self.sortable_columns = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Build the row query suffix and its arguments
    ///
    /// Returns ` WHERE ... ORDER BY ... LIMIT ? OFFSET ?` (each part only
    /// when present) with arguments in placeholder order: predicates in
    /// field declaration order, then limit, then offset.
    pub fn build<F: FilterParams>(
        &mut self,
        filter: &F,
    ) -> Result<(String, Vec<SqlValue>), QueryBuilderError> {
        self.built = None;

        let mut fragments = Vec::new();
        let mut args = Vec::new();
        let mut page = None;
        let mut limit = None;
        let mut sort_values = Vec::new();

        for (descriptor, value) in F::descriptors().iter().zip(filter.field_values()) {
            let cursor = FieldCursor::new(descriptor, value);

            if cursor.is_page() {
                page = Some(integer_value(cursor.value()));
            } else if cursor.is_limit() {
                limit = Some(integer_value(cursor.value()));
            } else if cursor.is_sort_by() {
                sort_values.extend(text_values(cursor.value()));
            } else if let Some(clause) = cursor.make() {
                fragments.push(clause.text);
                args.extend(clause.args);
            }
        }

        let where_clause = SqlGenerator::build_where_clause(&fragments);
        let predicate_args = args.clone();

        let order_by = self.resolve_order(F::sortable_columns(), &sort_values)?;
        let mut sql = where_clause.clone();
        sql.push_str(&SqlGenerator::build_order_clause(&order_by));

        let window = if page.is_some() || limit.is_some() {
            let (page_no, page_size) = self
                .pagination
                .validate_page_and_limit(page.flatten().unwrap_or(0), limit.flatten().unwrap_or(0));
            let window = PageWindow::new(page_no, page_size, self.options.extra_limit);

            sql.push_str(&SqlGenerator::build_limit_clause(true, page.is_some()));
            args.push(SqlValue::Int(window.fetch_limit));
            if page.is_some() {
                args.push(SqlValue::Int(window.offset));
            }
            Some(window)
        } else {
            None
        };

        tracing::trace!(
            "[BUILD] predicates: {}, order keys: {}, args: {}",
            fragments.len(),
            order_by.len(),
            args.len()
        );

        self.built = Some(BuiltQuery {
            where_clause,
            args: predicate_args,
            window,
        });

        Ok((sql, args))
    }

    /// The count query suffix: the predicates of the last `build`, without
    /// ordering or pagination
    pub fn build_count(&self) -> Result<(String, Vec<SqlValue>), QueryBuilderError> {
        self.built
            .as_ref()
            .map(|built| (built.where_clause.clone(), built.args.clone()))
            .ok_or(QueryBuilderError::NotBuilt)
    }

    /// Page, limit and offset applied by the last `build`
    ///
    /// `None` before a build or when the filter has no pagination fields.
    pub fn page_window(&self) -> Option<PageWindow> {
        self.built.as_ref().and_then(|built| built.window)
    }

    fn resolve_order(
        &self,
        filter_columns: &[&str],
        sort_values: &[String],
    ) -> Result<Vec<(ValidatedColumnName, SortOrder)>, QueryBuilderError> {
        let mut order_by = Vec::new();

        for value in sort_values {
            for key in SortKey::parse_list(value)? {
                let allowed = match &self.sortable_columns {
                    Some(columns) => columns.iter().any(|c| *c == key.column),
                    None => filter_columns.contains(&key.column.as_str()),
                };
                if !allowed {
                    return Err(QueryBuilderError::UnknownSortColumn(key.column));
                }

                let column = ValidatedColumnName::new(&key.column).map_err(|source| {
                    QueryBuilderError::InvalidSortColumn {
                        column: key.column.clone(),
                        source,
                    }
                })?;
                order_by.push((column, key.order));
            }
        }

        Ok(order_by)
    }
}

/// Integer content of a `page` or `limit` field
fn integer_value(value: &FieldValue) -> Option<i64> {
    match value {
        FieldValue::Scalar(v) | FieldValue::Nullable(Some(v)) => v.as_i64(),
        _ => None,
    }
}

/// Text content of a `sortBy` field
fn text_values(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::Scalar(v) | FieldValue::Nullable(Some(v)) => {
            v.as_str().map(str::to_string).into_iter().collect()
        }
        FieldValue::MultiValue(values) => values
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
