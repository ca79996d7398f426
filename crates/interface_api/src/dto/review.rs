//! Review DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{PokemonId, ReviewId, ReviewerId};
use domain_catalog::Review;

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    pub id: Option<ReviewId>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
}

impl ReviewRequest {
    pub fn into_review(self) -> Review {
        Review::new(self.title, self.text, self.rating)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub title: String,
    pub text: String,
    pub rating: i32,
    pub pokemon_id: PokemonId,
    pub reviewer_id: ReviewerId,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            title: review.title,
            text: review.text,
            rating: review.rating,
            pokemon_id: review.pokemon_id,
            reviewer_id: review.reviewer_id,
        }
    }
}
