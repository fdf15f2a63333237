//! Convenience re-exports for common qbuilder usage
//!
//! This prelude module re-exports the most commonly used items from the qbuilder workspace,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use qbuilder::prelude::*;
//!
//! let builder = QueryBuilder::new().with_extra_limit();
//! assert!(builder.options().extra_limit);
//! ```

// Core qbuilder components
pub use crate::core::PagedFetcher;
pub use crate::errors::QBuilderError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, PaginationConfig, QueryConfig};

// Re-export commonly used filter-object types for convenience
pub use filter_object::prelude::*;

// Re-export filter_object module for macro-generated code
pub use filter_object;

// Re-export the derive for filter structs
pub use filter_derive::FilterParams;

// Common external dependencies
pub use chrono::{DateTime, Utc};
pub use sqlx;
pub use tokio;
