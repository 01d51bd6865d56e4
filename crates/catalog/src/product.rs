use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use souk_core::{ArtisanId, CategoryId, CooperativeId, DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Image shown when a product is saved without one.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400.png";

/// Image hint used when none is provided.
pub const DEFAULT_IMAGE_HINT: &str = "product";

/// Unit price of a product.
///
/// Always finite and non-negative. `-0.0` is normalized to `0.0` so that the
/// total order below agrees with numeric equality.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if value < 0.0 {
            return Err(DomainError::validation("price must be non-negative"));
        }
        Ok(Self(if value == 0.0 { 0.0 } else { value }))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl ValueObject for Price {}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// A product listed in the catalog.
///
/// Read-only from the catalog's point of view: records are created and edited
/// by the back-office and only read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category_id: CategoryId,
    pub cooperative_id: CooperativeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artisan_id: Option<ArtisanId>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hint: Option<String>,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A product enriched with the mean of its review ratings.
///
/// Derived on every query and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithRating {
    #[serde(flatten)]
    pub product: Product,
    pub avg_rating: f64,
}

impl ProductWithRating {
    pub fn new(product: Product, avg_rating: f64) -> Self {
        Self { product, avg_rating }
    }

    pub fn id(&self) -> &ProductId {
        &self.product.id
    }
}

/// Unvalidated product input, as submitted by the back-office form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub cooperative_id: String,
    pub category_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_hint: Option<String>,
    #[serde(default)]
    pub artisan_id: Option<String>,
}

impl ProductDraft {
    /// Validate the draft and build a product with the given id.
    ///
    /// Blank image fields fall back to the placeholder image and the generic
    /// hint; a blank artisan means "no artisan".
    pub fn validate(self, id: ProductId) -> DomainResult<Product> {
        if self.name.trim().chars().count() < 3 {
            return Err(DomainError::validation("name must contain at least 3 characters"));
        }
        if self.description.trim().chars().count() < 10 {
            return Err(DomainError::validation(
                "description must contain at least 10 characters",
            ));
        }
        let price = Price::new(self.price)?;
        let cooperative_id = CooperativeId::new(self.cooperative_id)
            .map_err(|_| DomainError::validation("a cooperative must be selected"))?;
        let category_id = CategoryId::new(self.category_id)
            .map_err(|_| DomainError::validation("a category must be selected"))?;

        let image_url = non_blank(self.image_url).unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());
        if !(image_url.starts_with("http://") || image_url.starts_with("https://")) {
            return Err(DomainError::validation("image url must be an http(s) url"));
        }
        let image_hint = non_blank(self.image_hint).unwrap_or_else(|| DEFAULT_IMAGE_HINT.to_string());
        let artisan_id = non_blank(self.artisan_id).map(ArtisanId::new).transpose()?;

        Ok(Product {
            id,
            name: self.name,
            description: self.description,
            price,
            category_id,
            cooperative_id,
            artisan_id,
            image_url,
            image_hint: Some(image_hint),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
