//! Country DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::CountryId;
use domain_catalog::Country;

#[derive(Debug, Deserialize, Validate)]
pub struct CountryRequest {
    pub id: Option<CountryId>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

impl CountryRequest {
    pub fn into_country(self, id: CountryId) -> Country {
        Country { id, name: self.name }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountryResponse {
    pub id: CountryId,
    pub name: String,
}

impl From<Country> for CountryResponse {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            name: country.name,
        }
    }
}
