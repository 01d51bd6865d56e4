//! Read-side ports for catalog data, plus their adapters.
//!
//! The catalog pipeline only ever reads through these traits. Adapters are
//! injected explicitly (`Arc<dyn ProductRepository>`), which is what lets tests
//! swap in in-memory or failure-injecting fakes.

use async_trait::async_trait;
use thiserror::Error;

use souk_catalog::{Product, Review};
use souk_core::{ArtisanId, CategoryId, CooperativeId, ProductId};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;

/// Errors raised by repository adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backing store did not answer in time.
    #[error("store timed out: {0}")]
    Timeout(String),

    /// A stored record could not be turned into a domain value.
    #[error("failed to decode stored record: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        let message = err.to_string();
        match err {
            sqlx::Error::PoolTimedOut => RepositoryError::Timeout(message),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => RepositoryError::Decode(message),
            _ => RepositoryError::Unavailable(message),
        }
    }
}

/// Product records.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, optionally restricted to an exact category match.
    ///
    /// Order is the store's natural iteration order.
    async fn list_all(&self, category: Option<&CategoryId>) -> Result<Vec<Product>, RepositoryError>;

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    async fn list_by_cooperative(&self, cooperative: &CooperativeId) -> Result<Vec<Product>, RepositoryError>;

    async fn list_by_artisan(&self, artisan: &ArtisanId) -> Result<Vec<Product>, RepositoryError>;

    /// Number of products, optionally restricted to a category.
    async fn count(&self, category: Option<&CategoryId>) -> Result<usize, RepositoryError> {
        Ok(self.list_all(category).await?.len())
    }
}

/// Review records. Reviews are append-only; this port only reads them.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn list_for_product(&self, product_id: &ProductId) -> Result<Vec<Review>, RepositoryError>;
}
