//! Query builder utilities
//!
//! This module turns a filter struct into the predicate and pagination
//! suffix of a MySQL query.

pub mod builder;
pub mod cursor;
pub mod operand;
pub mod ordering;
pub mod pagination;
pub mod sql_generation;

#[cfg(test)]
mod tests;

pub use builder::{BuildOptions, QueryBuilder};
pub use cursor::{Clause, ClauseForm, FieldCursor, PredicateProducer};
pub use operand::Operand;
pub use ordering::{SortKey, SortOrder};
pub use pagination::{validate_page_and_limit, PageWindow, Pagination};
