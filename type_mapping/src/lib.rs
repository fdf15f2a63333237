//! Unified type mapping between Rust filter fields and MySQL query arguments
//! This crate provides the type registry shared by the derive macro and the query builder

pub mod sql;
pub mod types;

// Re-export commonly used items
pub use sql::{normalize_type, rust_type_to_field_kind, FieldKind};
pub use types::{FieldValue, SqlValue, ToFieldValue};
