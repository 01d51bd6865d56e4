use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use souk_catalog::{Page, PageRequest, ProductWithRating, Review, SearchQuery, SortKey, average_rating, rank_and_paginate};
use souk_core::{ArtisanId, CategoryId, CooperativeId, ProductId};

use super::{CatalogAssembler, CatalogError, RatingAggregator};
use crate::config::CatalogConfig;
use crate::repository::{ProductRepository, ReviewRepository};

/// Parameters of a catalog listing, as received from a caller.
///
/// Missing values take defaults (page 1, configured page size, all categories,
/// rating order). A blank category means "all categories".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListProductsQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub category: Option<String>,
    #[serde(alias = "sort")]
    pub sort_by: Option<String>,
}

/// A product page: the product, its rating and its reviews, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product: ProductWithRating,
    pub reviews: Vec<Review>,
}

/// Catalog query facade.
///
/// Stateless: safe to share behind an `Arc` and call concurrently. Each call
/// runs under the configured deadline; dropping the returned future cancels any
/// in-flight store reads.
#[derive(Clone)]
pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
    reviews: Arc<dyn ReviewRepository>,
    assembler: CatalogAssembler,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        reviews: Arc<dyn ReviewRepository>,
        config: CatalogConfig,
    ) -> Self {
        let aggregator = RatingAggregator::new(reviews.clone());
        let assembler = CatalogAssembler::new(products.clone(), aggregator, config.enrich_concurrency);
        Self {
            products,
            reviews,
            assembler,
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// One page of the (optionally category-filtered) catalog, ranked.
    #[tracing::instrument(skip(self))]
    pub async fn list_products(&self, query: ListProductsQuery) -> Result<Page<ProductWithRating>, CatalogError> {
        let request = PageRequest::new(
            positive("page", query.page.unwrap_or(1))?,
            positive("page_size", query.page_size.unwrap_or(self.config.default_page_size as i64))?,
        )?;
        let category = query
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(CategoryId::new)
            .transpose()?;
        let sort = SortKey::parse_lenient(query.sort_by.as_deref());
        if let Some(raw) = query.sort_by.as_deref().filter(|raw| raw.parse::<SortKey>().is_err()) {
            tracing::debug!(sort_by = raw, fallback = %sort, "unrecognized sort key");
        }

        self.with_deadline("list_products", async {
            let items = self.assembler.assemble(category.as_ref()).await?;
            Ok::<_, CatalogError>(rank_and_paginate(items, sort, request))
        })
        .await
    }

    /// The best-rated products: the top of a rating-ordered pool.
    #[tracing::instrument(skip(self))]
    pub async fn featured_products(&self) -> Result<Vec<ProductWithRating>, CatalogError> {
        let pool = PageRequest::first(self.config.featured_pool_size)?;
        let count = self.config.featured_count;

        self.with_deadline("featured_products", async {
            let items = self.assembler.assemble(None).await?;
            let mut page = rank_and_paginate(items, SortKey::RatingDesc, pool).items;
            page.truncate(count);
            Ok::<_, CatalogError>(page)
        })
        .await
    }

    /// Products whose name or description contains `query`, ignoring case.
    ///
    /// Results come in the store's natural order. An empty query returns
    /// nothing without reading the store.
    #[tracing::instrument(skip(self))]
    pub async fn search_products(&self, query: &str) -> Result<Vec<ProductWithRating>, CatalogError> {
        let Some(query) = SearchQuery::new(query) else {
            return Ok(Vec::new());
        };

        self.with_deadline("search_products", async {
            let matches = self
                .products
                .list_all(None)
                .await?
                .into_iter()
                .filter(|p| query.matches(p))
                .collect();
            Ok::<_, CatalogError>(self.assembler.enrich(matches).await)
        })
        .await
    }

    /// A single product with its rating and reviews.
    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Result<ProductDetail, CatalogError> {
        let id = ProductId::new(id)?;

        self.with_deadline("get_product", async {
            let product = self
                .products
                .get_by_id(&id)
                .await?
                .ok_or_else(|| CatalogError::NotFound(format!("product {id}")))?;
            let mut reviews = self.reviews.list_for_product(&id).await?;
            reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let avg_rating = average_rating(&reviews);
            Ok::<_, CatalogError>(ProductDetail {
                product: ProductWithRating::new(product, avg_rating),
                reviews,
            })
        })
        .await
    }

    /// All products of a cooperative, with ratings.
    #[tracing::instrument(skip(self))]
    pub async fn products_by_cooperative(&self, id: &str) -> Result<Vec<ProductWithRating>, CatalogError> {
        let id = CooperativeId::new(id)?;
        self.with_deadline("products_by_cooperative", async {
            let products = self.products.list_by_cooperative(&id).await?;
            Ok::<_, CatalogError>(self.assembler.enrich(products).await)
        })
        .await
    }

    /// All products made by an artisan, with ratings.
    #[tracing::instrument(skip(self))]
    pub async fn products_by_artisan(&self, id: &str) -> Result<Vec<ProductWithRating>, CatalogError> {
        let id = ArtisanId::new(id)?;
        self.with_deadline("products_by_artisan", async {
            let products = self.products.list_by_artisan(&id).await?;
            Ok::<_, CatalogError>(self.assembler.enrich(products).await)
        })
        .await
    }

    /// Number of products, optionally in one category.
    #[tracing::instrument(skip(self))]
    pub async fn count_products(&self, category: Option<&str>) -> Result<usize, CatalogError> {
        let category = category
            .filter(|c| !c.trim().is_empty())
            .map(CategoryId::new)
            .transpose()?;
        self.with_deadline("count_products", async {
            Ok::<_, CatalogError>(self.products.count(category.as_ref()).await?)
        })
        .await
    }

    async fn with_deadline<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, CatalogError>>,
    ) -> Result<T, CatalogError> {
        let deadline = self.config.operation_timeout;
        match tokio::time::timeout(deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(operation, timeout_ms = deadline.as_millis() as u64, "catalog operation timed out");
                Err(CatalogError::DataUnavailable(format!(
                    "{operation} timed out after {}ms",
                    deadline.as_millis()
                )))
            }
        }
    }
}

impl core::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn positive(name: &'static str, value: i64) -> Result<usize, CatalogError> {
    usize::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| CatalogError::InvalidParameter(format!("{name} must be >= 1 (got {value})")))
}
