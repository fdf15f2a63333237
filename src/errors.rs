//! Error types for the qbuilder crate
//!
//! This module contains all error types that can be returned by qbuilder operations.

use config::ConfigError;
use filter_object::{ParamError, QueryBuilderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QBuilderError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Query build error: {0}")]
    QueryBuilder(#[from] QueryBuilderError),

    #[error("Parameter error: {0}")]
    Param(#[from] ParamError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
