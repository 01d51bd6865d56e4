//! Catalog query pipeline.
//!
//! Products flow leaf to root through:
//! - `aggregator`: product id -> average review rating
//! - `assembler`: product records -> products enriched with their rating
//! - `service`: the query facade (listing, featured, search, lookups), which
//!   ranks and paginates with `souk_catalog::ranking`
//!
//! The pipeline holds no state between calls. Every call re-reads the store and
//! recomputes ratings; nothing is cached.

use thiserror::Error;

use souk_core::DomainError;

use crate::repository::RepositoryError;

pub mod aggregator;
pub mod assembler;
pub mod service;


pub use aggregator::RatingAggregator;
pub use assembler::CatalogAssembler;
pub use service::{CatalogService, ListProductsQuery, ProductDetail};

/// Errors surfaced by catalog operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The backing store could not be reached or did not answer in time.
    #[error("catalog data unavailable: {0}")]
    DataUnavailable(String),

    /// The caller supplied an unusable parameter (page or page size below 1, blank id).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A point lookup found nothing.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<RepositoryError> for CatalogError {
    fn from(err: RepositoryError) -> Self {
        CatalogError::DataUnavailable(err.to_string())
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => CatalogError::NotFound("requested record does not exist".to_string()),
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => CatalogError::InvalidParameter(msg),
        }
    }
}
