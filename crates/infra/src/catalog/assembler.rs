use std::sync::Arc;

use futures::stream::{self, StreamExt};

use souk_catalog::{Product, ProductWithRating};
use souk_core::CategoryId;

use super::{CatalogError, RatingAggregator};
use crate::repository::ProductRepository;

/// Fetches product records and enriches each with its average rating.
#[derive(Clone)]
pub struct CatalogAssembler {
    products: Arc<dyn ProductRepository>,
    aggregator: RatingAggregator,
    concurrency: usize,
}

impl CatalogAssembler {
    pub fn new(products: Arc<dyn ProductRepository>, aggregator: RatingAggregator, concurrency: usize) -> Self {
        Self {
            products,
            aggregator,
            concurrency: concurrency.max(1),
        }
    }

    /// All products (optionally of one category), enriched.
    ///
    /// Failing to list products fails the whole call with `DataUnavailable`.
    pub async fn assemble(&self, category: Option<&CategoryId>) -> Result<Vec<ProductWithRating>, CatalogError> {
        let products = self.products.list_all(category).await.inspect_err(|e| {
            tracing::error!(error = %e, category = ?category.map(CategoryId::as_str), "failed to list products");
        })?;
        Ok(self.enrich(products).await)
    }

    /// Attach ratings to `products`, keeping their order.
    ///
    /// Review reads run concurrently, at most `concurrency` at a time. A product
    /// whose reviews cannot be read is kept with a rating of `0.0`.
    pub async fn enrich(&self, products: Vec<Product>) -> Vec<ProductWithRating> {
        stream::iter(products)
            .map(|product| async move {
                let avg_rating = match self.aggregator.average_for(&product.id).await {
                    Ok(avg) => avg,
                    Err(e) => {
                        tracing::warn!(
                            product_id = %product.id,
                            error = %e,
                            "rating unavailable; defaulting to 0"
                        );
                        0.0
                    }
                };
                ProductWithRating::new(product, avg_rating)
            })
            // Ranking ties fall back to encounter order; keep it.
            .buffered(self.concurrency)
            .collect()
            .await
    }
}

impl core::fmt::Debug for CatalogAssembler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogAssembler")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}
