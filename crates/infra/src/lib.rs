//! Infrastructure layer: repositories, configuration, demo seed data and the
//! catalog query pipeline.

pub mod catalog;
pub mod config;
pub mod repository;
pub mod seed;

pub use catalog::{CatalogError, CatalogService, ListProductsQuery, ProductDetail};
pub use config::{CatalogConfig, ConfigError, ServerConfig};
pub use seed::{SeedCatalog, SeedEntry, SeedError};
