//! Convenience re-exports for common filter-object usage

// Core trait
pub use crate::traits::{FieldDescriptor, FilterParams};

// Error types
pub use crate::errors::{ParamError, QueryBuilderError};

// Query building
pub use crate::query_builder::{BuildOptions, PageWindow, Pagination, QueryBuilder, SortOrder};

// Param codec
pub use crate::params::{ParamMap, ParamValue};

// Values
pub use type_mapping::{FieldValue, SqlValue};

// Common external dependencies that are frequently used
pub use serde::{Deserialize, Serialize};
pub use sqlx::{FromRow, MySqlPool, Row};
