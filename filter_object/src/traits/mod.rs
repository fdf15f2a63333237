//! Traits for filter structs
//!
//! This module contains the traits that describe a filter struct to the
//! query builder and the param codec.

pub mod filter_params;

// Re-export all public items for convenience
pub use filter_params::{FieldDescriptor, FilterParams, LIMIT_PARAM, PAGE_PARAM, SORT_BY_PARAM};
