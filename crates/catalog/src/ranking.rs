//! Ranking and pagination of enriched products.
//!
//! The store cannot sort by a computed field (the average rating), so the whole
//! filtered set is ordered here and then sliced. Everything in this module is a
//! pure function of its inputs.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use souk_core::DomainError;

use crate::collation;
use crate::product::ProductWithRating;

/// Total orderings supported by catalog listings.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "rating-desc")]
    RatingDesc,
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "name-asc")]
    NameAsc,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::RatingDesc => "rating-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::NameAsc => "name-asc",
        }
    }

    /// Parse a caller-supplied sort key, falling back to the default ordering
    /// for missing or unrecognized values.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    fn compare(self, a: &ProductWithRating, b: &ProductWithRating) -> Ordering {
        match self {
            SortKey::RatingDesc => b.avg_rating.total_cmp(&a.avg_rating),
            SortKey::PriceAsc => a.product.price.cmp(&b.product.price),
            SortKey::PriceDesc => b.product.price.cmp(&a.product.price),
            SortKey::NameAsc => collation::compare(&a.product.name, &b.product.name),
        }
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating-desc" => Ok(SortKey::RatingDesc),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "name-asc" => Ok(SortKey::NameAsc),
            other => Err(DomainError::validation(format!("unknown sort key: {other}"))),
        }
    }
}

/// A validated 1-based page request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Result<Self, DomainError> {
        if page < 1 {
            return Err(DomainError::validation("page must be >= 1"));
        }
        if page_size < 1 {
            return Err(DomainError::validation("page_size must be >= 1"));
        }
        Ok(Self { page, page_size })
    }

    /// The first page of the given size.
    pub fn first(page_size: usize) -> Result<Self, DomainError> {
        Self::new(1, page_size)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based offset of the first element of this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of a ranked listing plus the size of the whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

impl<T> Page<T> {
    /// Number of pages needed to show `total_count` items.
    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(page_size)
    }
}

/// Order products by `key`. Stable: ties keep their input order.
pub fn rank(mut items: Vec<ProductWithRating>, key: SortKey) -> Vec<ProductWithRating> {
    items.sort_by(|a, b| key.compare(a, b));
    items
}

/// Slice out one page. Pages past the end are empty, not an error.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_count = items.len();
    let items = items
        .into_iter()
        .skip(request.offset())
        .take(request.page_size())
        .collect();
    Page { items, total_count }
}

pub fn rank_and_paginate(
    items: Vec<ProductWithRating>,
    key: SortKey,
    request: PageRequest,
) -> Page<ProductWithRating> {
    paginate(rank(items, key), request)
}
