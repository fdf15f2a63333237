//! # qbuilder
//!
//! Dynamic struct-to-SQL predicate building for MySQL: a filter struct with
//! `#[filter(...)]` field tags becomes a parameterized `WHERE` clause, a
//! matching count clause, and limit/offset pagination with next-page
//! look-ahead.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qbuilder::prelude::*;
//!
//! #[derive(Debug, Default, FilterParams)]
//! #[filter(sortable = "name, created_at")]
//! pub struct GetUserParam {
//!     #[filter(param = "name", db = "name")]
//!     pub name: String,
//!
//!     #[filter(param = "status", db = "status")]
//!     pub status: Vec<String>,
//!
//!     #[filter(param = "created_at__gte", db = "created_at")]
//!     pub created_from: DateTime<Utc>,
//!
//!     #[filter(param = "page")]
//!     pub page: i64,
//!
//!     #[filter(param = "limit")]
//!     pub limit: i64,
//!
//!     #[filter(param = "sortBy")]
//!     pub sort_by: Vec<String>,
//! }
//!
//! #[derive(Debug, FromRow)]
//! pub struct User {
//!     pub id: i64,
//!     pub name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QBuilderError> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 3306, "supersvc".to_string(),
//!         "root".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!     let fetcher = PagedFetcher::connect(&config).await?;
//!
//!     let filter = GetUserParam {
//!         status: vec!["active".to_string()],
//!         page: 1,
//!         limit: 20,
//!         ..Default::default()
//!     };
//!
//!     let (users, pagination): (Vec<User>, Pagination) = fetcher
//!         .fetch_page("SELECT id, name FROM user", "SELECT COUNT(1) FROM user", &filter)
//!         .await?;
//!     println!("{} users, next page: {}", users.len(), pagination.has_next);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::PagedFetcher;
pub use errors::QBuilderError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, PaginationConfig, QueryConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use filter_derive;
pub use filter_object;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use sqlx;
