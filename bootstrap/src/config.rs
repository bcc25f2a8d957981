//! Configuration for the storefront backend.
//!
//! Loaded from environment variables. Connection strings are required — a
//! backend with no store handle cannot safely serve traffic, so their absence
//! aborts startup before the bootstrap phase is ever reached. Tuning knobs
//! fall back to defaults, but a value that is present and unparseable is
//! fatal too.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Fatal configuration error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required value is absent or empty.
    #[error("Missing required configuration value {name}")]
    Missing {
        /// Environment variable name.
        name: &'static str,
    },

    /// A value is present but cannot be parsed.
    #[error("Invalid configuration value {name}: {reason}")]
    Invalid {
        /// Environment variable name.
        name: &'static str,
        /// Parse failure detail.
        reason: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog (business data) store.
    pub catalog: PostgresConfig,
    /// Identity store.
    pub identity: PostgresConfig,
    /// Basket cache.
    pub cache: CacheConfig,
    /// HTTP server.
    pub server: ServerConfig,
    /// Bootstrap phase tuning.
    pub bootstrap: BootstrapConfig,
}

/// `PostgreSQL` store configuration.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Minimum number of idle pooled connections.
    pub min_connections: u32,
    /// Connection acquire timeout in seconds.
    pub acquire_timeout: u64,
}

/// Redis cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Connection URL.
    pub url: String,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

/// Bootstrap phase tuning.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Upper bound for each migration/seed step, in seconds.
    pub step_timeout_secs: u64,
}

impl BootstrapConfig {
    /// Step timeout as a [`Duration`].
    #[must_use]
    pub const fn step_timeout(&self) -> Duration {
        Duration::from_secs(self.step_timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a connection string is missing/empty or any
    /// present value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            catalog: PostgresConfig {
                url: required(&lookup, "CATALOG_DATABASE_URL")?,
                max_connections: parsed(&lookup, "CATALOG_DATABASE_MAX_CONNECTIONS", 10)?,
                min_connections: parsed(&lookup, "CATALOG_DATABASE_MIN_CONNECTIONS", 2)?,
                acquire_timeout: parsed(&lookup, "CATALOG_DATABASE_ACQUIRE_TIMEOUT", 30)?,
            },
            identity: PostgresConfig {
                url: required(&lookup, "IDENTITY_DATABASE_URL")?,
                max_connections: parsed(&lookup, "IDENTITY_DATABASE_MAX_CONNECTIONS", 10)?,
                min_connections: parsed(&lookup, "IDENTITY_DATABASE_MIN_CONNECTIONS", 2)?,
                acquire_timeout: parsed(&lookup, "IDENTITY_DATABASE_ACQUIRE_TIMEOUT", 30)?,
            },
            cache: CacheConfig {
                url: required(&lookup, "REDIS_URL")?,
            },
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parsed(&lookup, "PORT", 8080)?,
            },
            bootstrap: BootstrapConfig {
                step_timeout_secs: parsed(&lookup, "BOOTSTRAP_STEP_TIMEOUT_SECS", 120)?,
            },
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing { name }),
    }
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("CATALOG_DATABASE_URL", "postgres://localhost/souq_catalog"),
            ("IDENTITY_DATABASE_URL", "postgres://localhost/souq_identity"),
            ("REDIS_URL", "redis://localhost:6379"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<Config, ConfigError> {
        Config::from_lookup(|name| vars.get(name).map(ToString::to_string))
    }

    #[test]
    fn minimal_configuration_uses_defaults() {
        let config = load(&base_vars()).unwrap();
        assert_eq!(config.catalog.max_connections, 10);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.bootstrap.step_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn missing_cache_url_is_fatal() {
        let mut vars = base_vars();
        vars.remove("REDIS_URL");
        assert_eq!(
            load(&vars).unwrap_err(),
            ConfigError::Missing { name: "REDIS_URL" }
        );
    }

    #[test]
    fn empty_connection_string_counts_as_missing() {
        let mut vars = base_vars();
        vars.insert("REDIS_URL", "   ");
        assert_eq!(
            load(&vars).unwrap_err(),
            ConfigError::Missing { name: "REDIS_URL" }
        );
    }

    #[test]
    fn unparseable_port_is_fatal() {
        let mut vars = base_vars();
        vars.insert("PORT", "not-a-port");
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::Invalid { name: "PORT", .. }
        ));
    }
}
