//! Paginated fetch
//!
//! This module contains the caller side of the extra-limit contract: it runs
//! the row query with one look-ahead row, runs the count query built from
//! the same predicates, and shapes both into a page.

use std::time::Duration;

use config::{DatabaseConfig, PaginationConfig};
use filter_object::binding::{bind_query_as, bind_query_scalar};
use filter_object::{FilterParams, Pagination, QueryBuilder};
use sqlx::mysql::{MySqlPoolOptions, MySqlRow};
use sqlx::MySqlPool;

use crate::errors::QBuilderError;

/// Runs filter queries page by page against a MySQL pool
#[derive(Debug, Clone)]
pub struct PagedFetcher {
    pool: MySqlPool,
    pagination: PaginationConfig,
}

impl PagedFetcher {
    /// Create a fetcher with its own connection pool
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, QBuilderError> {
        let connection_string = config.connection_string();

        let mut pool_options = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;

        Ok(Self::from_pool(pool))
    }

    /// Create a fetcher over an existing pool
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self {
            pool,
            pagination: PaginationConfig::default(),
        }
    }

    /// Bounds applied to `page` and `limit`
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Result<Self, QBuilderError> {
        pagination.validate()?;
        self.pagination = pagination;
        Ok(self)
    }

    /// Get database pool reference
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), QBuilderError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    /// Fetch one page of rows matching `filter`
    ///
    /// `select_base` and `count_base` are complete statements without a
    /// `WHERE` clause, e.g. `SELECT id, name FROM user` and
    /// `SELECT COUNT(1) FROM user`. A filter without pagination fields
    /// returns every matching row as a single page.
    pub async fn fetch_page<R, F>(
        &self,
        select_base: &str,
        count_base: &str,
        filter: &F,
    ) -> Result<(Vec<R>, Pagination), QBuilderError>
    where
        R: for<'r> sqlx::FromRow<'r, MySqlRow> + Send + Unpin,
        F: FilterParams,
    {
        let mut query_builder = QueryBuilder::new()
            .with_extra_limit()
            .with_pagination(self.pagination);

        let (clause, args) = query_builder.build(filter)?;
        let sql = format!("{}{}", select_base, clause);
        crate::debug_log!("[FETCH_PAGE] SQL: {}", sql);
        crate::debug_log!("[FETCH_PAGE] params count: {}", args.len());

        let rows: Vec<R> = bind_query_as(sqlx::query_as::<_, R>(&sql), args)
            .fetch_all(&self.pool)
            .await?;

        let (count_clause, count_args) = query_builder.build_count()?;
        let count_sql = format!("{}{}", count_base, count_clause);
        crate::trace_log!("[FETCH_PAGE] count SQL: {}", count_sql);

        let total: i64 = bind_query_scalar(sqlx::query_scalar::<_, i64>(&count_sql), count_args)
            .fetch_one(&self.pool)
            .await?;

        let page = match query_builder.page_window() {
            Some(window) => Pagination::from_rows(rows, &window, total),
            None => {
                let size = rows.len() as i64;
                let pagination = Pagination {
                    page: config::DEFAULT_PAGE,
                    size,
                    total,
                    has_next: false,
                };
                (rows, pagination)
            }
        };

        Ok(page)
    }
}
