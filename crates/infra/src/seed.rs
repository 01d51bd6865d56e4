//! Demo catalog shipped with the server.
//!
//! `seed/catalog.json` holds the cooperatives' sample products and a few reviews
//! per product. Every record goes through the same draft validation as
//! back-office input before it reaches a store.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use souk_catalog::{Category, Product, ProductDraft, Review, ReviewDraft};
use souk_core::{DomainError, ProductId, ReviewId, UserId};

use crate::repository::RepositoryError;

/// The bundled demo catalog, as JSON.
pub const BUNDLED_CATALOG: &str = include_str!("../seed/catalog.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("malformed seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid seed record {id}: {source}")]
    Invalid { id: String, source: DomainError },

    #[error("failed to store seed data: {0}")]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] RepositoryError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCatalog {
    pub products: Vec<SeedProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedProduct {
    pub id: String,
    #[serde(flatten)]
    pub draft: ProductDraft,
    #[serde(default)]
    pub reviews: Vec<SeedReview>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedReview {
    pub author_id: String,
    pub author: String,
    #[serde(flatten)]
    pub draft: ReviewDraft,
}

/// A validated product and its reviews, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedEntry {
    pub product: Product,
    pub reviews: Vec<Review>,
}

impl SeedCatalog {
    pub fn bundled() -> Result<Self, SeedError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validate every record. Reviews get fresh ids and are stamped `now`.
    ///
    /// Products must use one of the fixed category slugs.
    pub fn validate(self, now: DateTime<Utc>) -> Result<Vec<SeedEntry>, SeedError> {
        self.products
            .into_iter()
            .map(|seed| {
                let id = seed.id;
                let invalid = |source: DomainError| SeedError::Invalid { id: id.clone(), source };

                let product_id = ProductId::new(id.as_str()).map_err(invalid)?;
                let product = seed.draft.validate(product_id).map_err(invalid)?;
                if !Category::all().iter().any(|c| c.contains(&product.category_id)) {
                    return Err(invalid(DomainError::validation(format!(
                        "unknown category {}",
                        product.category_id
                    ))));
                }

                let reviews = seed
                    .reviews
                    .into_iter()
                    .map(|r| {
                        let author_id = UserId::new(r.author_id)?;
                        r.draft
                            .validate(ReviewId::generate(), product.id.clone(), author_id, r.author, now)
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(invalid)?;

                Ok(SeedEntry { product, reviews })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_is_valid() {
        let entries = SeedCatalog::bundled().unwrap().validate(Utc::now()).unwrap();
        assert_eq!(entries.len(), 12);
        assert!(entries.iter().any(|e| e.reviews.is_empty()));
        assert!(entries.iter().all(|e| e.reviews.iter().all(|r| r.product_id == e.product.id)));
    }

    #[test]
    fn bundled_products_use_known_categories() {
        let entries = SeedCatalog::bundled().unwrap().validate(Utc::now()).unwrap();
        for entry in &entries {
            assert!(
                Category::by_slug(entry.product.category_id.as_str()).is_some(),
                "{} in {}",
                entry.product.id,
                entry.product.category_id
            );
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let raw = r#"{"products": [{
            "id": "p1",
            "name": "Lampe en cuivre",
            "description": "Lampe ciselée à la main.",
            "price": 60.0,
            "category_id": "luminaires",
            "cooperative_id": "c7"
        }]}"#;
        let err = SeedCatalog::from_json(raw).unwrap().validate(Utc::now()).unwrap_err();
        assert!(matches!(err, SeedError::Invalid { ref id, .. } if id == "p1"));
    }

    #[test]
    fn invalid_review_names_its_product() {
        let raw = r#"{"products": [{
            "id": "p9",
            "name": "Sac Gnawi",
            "description": "Sac en cuir de chèvre tanné.",
            "price": 85.0,
            "category_id": "sacs-sacs-a-main",
            "cooperative_id": "c8",
            "reviews": [{"author_id": "u1", "author": "Hamid", "rating": 7, "text": "Superbe sac en cuir."}]
        }]}"#;
        let err = SeedCatalog::from_json(raw).unwrap().validate(Utc::now()).unwrap_err();
        assert!(matches!(err, SeedError::Invalid { ref id, .. } if id == "p9"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(SeedCatalog::from_json("{"), Err(SeedError::Parse(_))));
    }
}
