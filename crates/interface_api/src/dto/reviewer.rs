//! Reviewer DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ReviewerId;
use domain_catalog::Reviewer;

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewerRequest {
    pub id: Option<ReviewerId>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
}

impl ReviewerRequest {
    pub fn into_reviewer(self, id: ReviewerId) -> Reviewer {
        Reviewer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewerResponse {
    pub id: ReviewerId,
    pub first_name: String,
    pub last_name: String,
}

impl From<Reviewer> for ReviewerResponse {
    fn from(reviewer: Reviewer) -> Self {
        Self {
            id: reviewer.id,
            first_name: reviewer.first_name,
            last_name: reviewer.last_name,
        }
    }
}
