//! Query parameters and response bodies.

use serde::{Deserialize, Serialize};

use souk_catalog::{Page, ProductWithRating};
use souk_infra::ListProductsQuery;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountParams {
    pub category: Option<String>,
}

/// One page of the catalog plus the paging state needed to render controls.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPageResponse {
    pub items: Vec<ProductWithRating>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl ProductPageResponse {
    /// `query` must be the (already accepted) query that produced `page`.
    pub fn new(page: Page<ProductWithRating>, query: &ListProductsQuery, default_page_size: usize) -> Self {
        let current = query.page.and_then(|p| usize::try_from(p).ok()).unwrap_or(1);
        let page_size = query
            .page_size
            .and_then(|s| usize::try_from(s).ok())
            .unwrap_or(default_page_size);
        Self {
            total_pages: page.total_pages(page_size),
            total_count: page.total_count,
            items: page.items,
            page: current,
            page_size,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub count: usize,
}
