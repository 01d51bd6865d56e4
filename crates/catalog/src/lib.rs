//! Catalog domain module.
//!
//! This crate contains the business rules of the marketplace catalog (products,
//! reviews, categories, rating aggregation, ranking and search), implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod category;
pub mod collation;
pub mod product;
pub mod ranking;
pub mod rating;
pub mod review;
pub mod search;

pub use category::Category;
pub use product::{Price, Product, ProductDraft, ProductWithRating};
pub use ranking::{Page, PageRequest, SortKey, paginate, rank, rank_and_paginate};
pub use rating::average_rating;
pub use review::{Rating, Review, ReviewDraft};
pub use search::SearchQuery;
