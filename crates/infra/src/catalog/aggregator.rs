use std::sync::Arc;

use souk_catalog::average_rating;
use souk_core::ProductId;

use super::CatalogError;
use crate::repository::ReviewRepository;

/// Computes a product's average rating from its reviews.
#[derive(Clone)]
pub struct RatingAggregator {
    reviews: Arc<dyn ReviewRepository>,
}

impl RatingAggregator {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    /// Mean of the product's review ratings, `0.0` when it has none.
    ///
    /// Fails with `DataUnavailable` only when the reviews cannot be read;
    /// whether to propagate that or degrade is the caller's decision.
    pub async fn average_for(&self, product_id: &ProductId) -> Result<f64, CatalogError> {
        let reviews = self.reviews.list_for_product(product_id).await?;
        Ok(average_rating(&reviews))
    }
}

impl core::fmt::Debug for RatingAggregator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RatingAggregator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCatalogStore;
    use souk_catalog::{ProductDraft, ReviewDraft};
    use souk_core::UserId;

    fn seeded(stars: &[u8]) -> (Arc<InMemoryCatalogStore>, ProductId) {
        let store = Arc::new(InMemoryCatalogStore::new());
        let product = store
            .create_product(ProductDraft {
                name: "Tajine décoré".to_string(),
                description: "Tajine en terre cuite peint à la main.".to_string(),
                price: 35.0,
                cooperative_id: "c4".to_string(),
                category_id: "cuisine-salle-a-manger".to_string(),
                ..ProductDraft::default()
            })
            .unwrap();
        for s in stars {
            store
                .add_review(
                    &product.id,
                    ReviewDraft {
                        text: "Très joli tajine, conforme.".to_string(),
                        rating: *s,
                    },
                    UserId::new("u1").unwrap(),
                    "Karim",
                )
                .unwrap();
        }
        (store, product.id)
    }

    #[tokio::test]
    async fn averages_review_ratings() {
        let (store, id) = seeded(&[5, 3, 4]);
        let aggregator = RatingAggregator::new(store);
        assert_eq!(aggregator.average_for(&id).await.unwrap(), 4.0);
    }

    #[tokio::test]
    async fn product_without_reviews_rates_zero() {
        let (store, id) = seeded(&[]);
        let aggregator = RatingAggregator::new(store);
        assert_eq!(aggregator.average_for(&id).await.unwrap(), 0.0);
    }
}
