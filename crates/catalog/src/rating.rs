//! Review-derived product ratings.

use crate::review::Review;

/// Arithmetic mean of the review ratings, or `0.0` when there are none.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u64 = reviews.iter().map(|r| u64::from(r.rating.stars())).sum();
    total as f64 / reviews.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::Rating;
    use chrono::Utc;
    use souk_core::{ProductId, ReviewId, UserId};

    fn reviews(stars: &[u8]) -> Vec<Review> {
        stars
            .iter()
            .enumerate()
            .map(|(i, s)| Review {
                id: ReviewId::new(format!("r{i}")).unwrap(),
                product_id: ProductId::new("p1").unwrap(),
                author_id: UserId::new("u1").unwrap(),
                author: "Youssef".to_string(),
                rating: Rating::new(*s).unwrap(),
                text: "Superbe travail artisanal".to_string(),
                created_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn mean_of_ratings() {
        assert_eq!(average_rating(&reviews(&[5, 3, 4])), 4.0);
        assert_eq!(average_rating(&reviews(&[5, 4])), 4.5);
    }

    #[test]
    fn no_reviews_is_zero_not_nan() {
        let avg = average_rating(&[]);
        assert_eq!(avg, 0.0);
        assert!(!avg.is_nan());
    }

    #[test]
    fn single_review_is_its_own_average() {
        assert_eq!(average_rating(&reviews(&[2])), 2.0);
    }
}
