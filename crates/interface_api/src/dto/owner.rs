//! Owner DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CountryId, OwnerId};
use domain_catalog::Owner;

#[derive(Debug, Deserialize, Validate)]
pub struct OwnerRequest {
    pub id: Option<OwnerId>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub gym: String,
}

impl OwnerRequest {
    pub fn into_owner(self, id: OwnerId, country_id: CountryId) -> Owner {
        Owner {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            gym: self.gym,
            country_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OwnerResponse {
    pub id: OwnerId,
    pub first_name: String,
    pub last_name: String,
    pub gym: String,
    pub country_id: CountryId,
}

impl From<Owner> for OwnerResponse {
    fn from(owner: Owner) -> Self {
        Self {
            id: owner.id,
            first_name: owner.first_name,
            last_name: owner.last_name,
            gym: owner.gym,
            country_id: owner.country_id,
        }
    }
}
