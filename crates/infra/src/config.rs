//! Configuration loading and representation.
//!
//! Everything is read from environment variables with sensible defaults.
//! Loading goes through a lookup function so tests never touch the process
//! environment.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Tuning knobs of the catalog query pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Page size used when a caller does not ask for one.
    pub default_page_size: usize,
    /// Number of top-rated candidates considered for the featured selection.
    pub featured_pool_size: usize,
    /// Number of featured products returned.
    pub featured_count: usize,
    /// Maximum number of concurrent review reads during enrichment.
    pub enrich_concurrency: usize,
    /// Deadline for a whole catalog operation.
    pub operation_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 9,
            featured_pool_size: 50,
            featured_count: 8,
            enrich_concurrency: 16,
            operation_timeout: Duration::from_secs(5),
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            default_page_size: parse_or(&lookup, "CATALOG_DEFAULT_PAGE_SIZE", defaults.default_page_size)?,
            featured_pool_size: parse_or(&lookup, "CATALOG_FEATURED_POOL_SIZE", defaults.featured_pool_size)?,
            featured_count: parse_or(&lookup, "CATALOG_FEATURED_COUNT", defaults.featured_count)?,
            enrich_concurrency: parse_or(&lookup, "CATALOG_ENRICH_CONCURRENCY", defaults.enrich_concurrency)?,
            operation_timeout: Duration::from_millis(parse_or(
                &lookup,
                "CATALOG_TIMEOUT_MS",
                defaults.operation_timeout.as_millis() as u64,
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("CATALOG_DEFAULT_PAGE_SIZE", self.default_page_size),
            ("CATALOG_FEATURED_POOL_SIZE", self.featured_pool_size),
            ("CATALOG_FEATURED_COUNT", self.featured_count),
            ("CATALOG_ENRICH_CONCURRENCY", self.enrich_concurrency),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    value: value.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        if self.operation_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: "CATALOG_TIMEOUT_MS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.featured_count > self.featured_pool_size {
            return Err(ConfigError::Invalid {
                key: "CATALOG_FEATURED_COUNT",
                value: self.featured_count.to_string(),
                reason: format!("cannot exceed the pool size ({})", self.featured_pool_size),
            });
        }
        Ok(())
    }
}

/// Process-level settings of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// When set, catalog data is read from Postgres; otherwise from memory.
    pub database_url: Option<String>,
    pub max_db_connections: u32,
    /// Load the bundled demo catalog at startup. Defaults to on for the
    /// in-memory store and off for Postgres.
    pub seed_demo_data: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        Ok(Self {
            bind_addr: parse_or(&lookup, "SOUK_BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            max_db_connections: parse_or(&lookup, "SOUK_DB_MAX_CONNECTIONS", 10)?,
            seed_demo_data: parse_or(&lookup, "SOUK_SEED", database_url.is_none())?,
            database_url,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = CatalogConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.featured_pool_size, 50);
        assert_eq!(config.featured_count, 8);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = CatalogConfig::from_lookup(lookup(&[
            ("CATALOG_DEFAULT_PAGE_SIZE", "12"),
            ("CATALOG_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.default_page_size, 12);
        assert_eq!(config.operation_timeout, Duration::from_millis(250));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = CatalogConfig::from_lookup(lookup(&[("CATALOG_ENRICH_CONCURRENCY", "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CATALOG_ENRICH_CONCURRENCY", .. }));
    }

    #[test]
    fn zero_and_inconsistent_values_are_rejected() {
        assert!(CatalogConfig::from_lookup(lookup(&[("CATALOG_DEFAULT_PAGE_SIZE", "0")])).is_err());
        assert!(CatalogConfig::from_lookup(lookup(&[("CATALOG_FEATURED_COUNT", "60")])).is_err());
    }

    #[test]
    fn server_defaults_to_in_memory_on_8080() {
        let config = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", " ")])).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_url, None);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn seeding_is_opt_in_for_postgres() {
        let postgres = lookup(&[("DATABASE_URL", "postgres://souk@localhost/souk")]);
        assert!(!ServerConfig::from_lookup(postgres).unwrap().seed_demo_data);

        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://souk@localhost/souk"),
            ("SOUK_SEED", "true"),
        ]))
        .unwrap();
        assert!(config.seed_demo_data);

        assert!(!ServerConfig::from_lookup(lookup(&[("SOUK_SEED", "false")])).unwrap().seed_demo_data);
        assert!(ServerConfig::from_lookup(lookup(&[("SOUK_SEED", "sometimes")])).is_err());
    }

    #[test]
    fn server_bind_address_is_parsed() {
        let config = ServerConfig::from_lookup(lookup(&[("SOUK_BIND_ADDR", "127.0.0.1:9000")])).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
    }
}
