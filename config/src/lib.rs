//! # Configuration Management for qbuilder
//!
//! This crate provides centralized configuration structures for the query
//! builder and the paginated fetch helper: database connection settings,
//! pagination bounds and build options.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{DatabaseConfig, PaginationConfig};
//!
//! let db_config = DatabaseConfig::new(
//!     "localhost".to_string(), 3306, "supersvc".to_string(),
//!     "root".to_string(), "password".to_string(),
//!     1, 10, 30, 600, 3600,
//! );
//!
//! let pagination = PaginationConfig::new(10, 1, 100);
//! assert_eq!(pagination.validate_page_and_limit(0, 0), (1, 10));
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [database]
//! host = "localhost"
//! port = 3306
//! database = "supersvc"
//! username = "root"
//! password = "password"
//! min_connections = 1
//! max_connections = 10
//! connection_timeout_seconds = 30
//! idle_timeout_seconds = 600
//! max_lifetime_seconds = 3600
//!
//! [pagination]
//! default_limit = 10
//! min_limit = 1
//! max_limit = 100
//!
//! [query]
//! extra_limit = true
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from the path in QBUILDER_CONFIG or ./qbuilder.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./qbuilder.toml";
const CONFIG_PATH_ENV: &str = "QBUILDER_CONFIG";

/// First page number; pages are 1-based
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

/// MySQL connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
    pub max_lifetime_seconds: u64,
}

/// Bounds applied to the `page` and `limit` fields of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_limit: i64,
    pub min_limit: i64,
    pub max_limit: i64,
}

/// Options for building queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Fetch `limit + 1` rows to detect a next page without a count query
    pub extra_limit: bool,
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = {
            // A missing .env file is fine, a malformed one is not
            if let Err(e) = dotenvy::dotenv() {
                if !e.not_found() {
                    return Err(e.into());
                }
            }

            if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
                Self::from_file(&config_path)
            } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
                Self::from_file(DEFAULT_CONFIG_PATH)
            } else {
                Err(ConfigError::Invalid(format!(
                    "Config path must be specified in .env file as {} or in {} file",
                    CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH
                )))
            }
        }?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.host.is_empty() {
            return Err(ConfigError::Invalid(
                "Database host cannot be empty".to_string(),
            ));
        }
        if self.database.port == 0 {
            return Err(ConfigError::Invalid(
                "Database port cannot be zero".to_string(),
            ));
        }
        if self.database.database.is_empty() {
            return Err(ConfigError::Invalid(
                "Database name cannot be empty".to_string(),
            ));
        }
        if self.database.username.is_empty() {
            return Err(ConfigError::Invalid(
                "Database username cannot be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database max_connections must be greater than 0".to_string(),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(
                "Database min_connections cannot be greater than max_connections".to_string(),
            ));
        }
        if self.database.connection_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Database connection_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        self.pagination.validate()
    }
}

impl DatabaseConfig {
    /// Create a new database configuration
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        host: String,
        port: u16,
        database: String,
        username: String,
        password: String,
        min_connections: u32,
        max_connections: u32,
        connection_timeout_seconds: u64,
        idle_timeout_seconds: u64,
        max_lifetime_seconds: u64,
    ) -> Self {
        Self {
            host,
            port,
            database,
            username,
            password,
            min_connections,
            max_connections,
            connection_timeout_seconds,
            idle_timeout_seconds,
            max_lifetime_seconds,
        }
    }

    /// Build connection string
    pub fn connection_string(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

impl PaginationConfig {
    /// Create a new pagination configuration
    pub fn new(default_limit: i64, min_limit: i64, max_limit: i64) -> Self {
        Self {
            default_limit,
            min_limit,
            max_limit,
        }
    }

    /// Clamp a requested page and limit
    ///
    /// Pages below 1 become 1. A limit below `min_limit` is replaced by
    /// `default_limit` and a limit above `max_limit` is capped. The limit is
    /// never below 1 and the page never so large that `page * limit`
    /// overflows.
    pub fn validate_page_and_limit(&self, page: i64, limit: i64) -> (i64, i64) {
        let limit = if limit < self.min_limit {
            self.default_limit
        } else {
            limit.min(self.max_limit)
        }
        .max(1);
        let page = page.clamp(DEFAULT_PAGE, i64::MAX / limit);
        (page, limit)
    }

    /// Check the bounds are usable: `1 <= min_limit <= default_limit <= max_limit`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_limit < 1 {
            return Err(ConfigError::Invalid(
                "Pagination min_limit must be at least 1".to_string(),
            ));
        }
        if self.min_limit > self.max_limit {
            return Err(ConfigError::Invalid(
                "Pagination min_limit cannot be greater than max_limit".to_string(),
            ));
        }
        if self.default_limit < self.min_limit || self.default_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "Pagination default_limit must be within [{}, {}]",
                self.min_limit, self.max_limit
            )));
        }
        Ok(())
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, MIN_LIMIT, MAX_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"
        [database]
        host = "localhost"
        port = 3306
        database = "supersvc"
        username = "root"
        password = ""
        min_connections = 1
        max_connections = 5
        connection_timeout_seconds = 30
        idle_timeout_seconds = 600
        max_lifetime_seconds = 0
    "#;

    #[test]
    fn test_optional_sections_default() {
        let config = AppConfig::from_toml_str(BASE).unwrap();
        assert_eq!(config.pagination, PaginationConfig::default());
        assert!(!config.query.extra_limit);
        assert_eq!(
            config.database.connection_string(),
            "mysql://root:@localhost:3306/supersvc"
        );
    }

    #[test]
    fn test_pagination_section() {
        let content = format!(
            "{}\n[pagination]\nmax_limit = 50\n\n[query]\nextra_limit = true\n",
            BASE
        );
        let config = AppConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.pagination.max_limit, 50);
        assert_eq!(config.pagination.default_limit, DEFAULT_LIMIT);
        assert!(config.query.extra_limit);
    }

    #[test]
    fn test_invalid_pagination_rejected() {
        let content = format!("{}\n[pagination]\ndefault_limit = 500\n", BASE);
        let err = AppConfig::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_host_rejected() {
        let content = BASE.replace("host = \"localhost\"", "host = \"\"");
        assert!(matches!(
            AppConfig::from_toml_str(&content),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_validate_page_and_limit() {
        let pagination = PaginationConfig::default();
        assert_eq!(pagination.validate_page_and_limit(0, 0), (1, 10));
        assert_eq!(pagination.validate_page_and_limit(-5, 10000), (1, 100));
        assert_eq!(pagination.validate_page_and_limit(3, 25), (3, 25));
        assert_eq!(pagination.validate_page_and_limit(2, -1), (2, 10));
    }

    #[test]
    fn test_huge_page_is_capped() {
        let pagination = PaginationConfig::default();
        assert_eq!(
            pagination.validate_page_and_limit(i64::MAX, 100),
            (i64::MAX / 100, 100)
        );
        assert_eq!(
            pagination.validate_page_and_limit(100_000_000_000_000_000, 100),
            (92_233_720_368_547_758, 100)
        );
    }

    #[test]
    fn test_degenerate_bounds() {
        let pagination = PaginationConfig::new(0, 0, 100);
        assert!(matches!(pagination.validate(), Err(ConfigError::Invalid(_))));
        assert_eq!(pagination.validate_page_and_limit(1, 0), (1, 1));
        assert!(PaginationConfig::default().validate().is_ok());
    }
}
