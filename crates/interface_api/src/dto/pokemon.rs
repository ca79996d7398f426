//! Pokemon DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::PokemonId;
use domain_catalog::Pokemon;

#[derive(Debug, Deserialize, Validate)]
pub struct PokemonRequest {
    pub id: Option<PokemonId>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub birth_date: NaiveDate,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub height: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub weight: i32,
}

impl PokemonRequest {
    pub fn into_pokemon(self, id: PokemonId) -> Pokemon {
        Pokemon {
            id,
            name: self.name,
            birth_date: self.birth_date,
            height: self.height,
            weight: self.weight,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PokemonResponse {
    pub id: PokemonId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub height: i32,
    pub weight: i32,
}

impl From<Pokemon> for PokemonResponse {
    fn from(pokemon: Pokemon) -> Self {
        Self {
            id: pokemon.id,
            name: pokemon.name,
            birth_date: pokemon.birth_date,
            height: pokemon.height,
            weight: pokemon.weight,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RatingResponse {
    pub pokemon_id: PokemonId,
    pub rating: Decimal,
}
