//! Request and response bodies
//!
//! Requests are validated with `validator` before they reach a repository.
//! Update requests may repeat the id from the path; a different id is
//! rejected.

pub mod category;
pub mod country;
pub mod owner;
pub mod pokemon;
pub mod review;
pub mod reviewer;

use serde::Deserialize;

use crate::error::ApiError;

/// Rejects a body whose id disagrees with the path
pub fn check_path_id<I: PartialEq + std::fmt::Display>(path: I, body: Option<I>) -> Result<(), ApiError> {
    match body {
        Some(body) if body != path => Err(ApiError::BadRequest(format!(
            "Body id {} does not match path id {}",
            body, path
        ))),
        _ => Ok(()),
    }
}

/// Owner and category a pokemon is created or updated with
#[derive(Debug, Deserialize)]
pub struct PokemonLinks {
    pub owner_id: core_kernel::OwnerId,
    pub category_id: core_kernel::CategoryId,
}

/// Country a new owner belongs to
#[derive(Debug, Deserialize)]
pub struct CountryParam {
    pub country_id: core_kernel::CountryId,
}

/// Author and subject of a new review
#[derive(Debug, Deserialize)]
pub struct ReviewLinks {
    pub reviewer_id: core_kernel::ReviewerId,
    pub pokemon_id: core_kernel::PokemonId,
}
