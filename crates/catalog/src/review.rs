use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use souk_core::{DomainError, DomainResult, Entity, ProductId, ReviewId, UserId, ValueObject};

/// Star rating attached to a review, in `1..=5`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&stars) {
            return Err(DomainError::validation(format!(
                "rating must be between {} and {} (got {stars})",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(stars))
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl ValueObject for Rating {}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// A buyer's review of a product.
///
/// Reviews belong to exactly one product and are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub author_id: UserId,
    /// Public display name of the author at the time of writing.
    pub author: String,
    pub rating: Rating,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Review {
    type Id = ReviewId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Unvalidated review input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub text: String,
    pub rating: u8,
}

impl ReviewDraft {
    pub fn validate(
        self,
        id: ReviewId,
        product_id: ProductId,
        author_id: UserId,
        author: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Review> {
        if self.text.trim().chars().count() < 10 {
            return Err(DomainError::validation("review must contain at least 10 characters"));
        }
        let rating = Rating::new(self.rating)?;
        let author = author.into();
        if author.trim().is_empty() {
            return Err(DomainError::validation("author name is required"));
        }

        Ok(Review {
            id,
            product_id,
            author_id,
            author,
            rating,
            text: self.text,
            created_at,
        })
    }
}
