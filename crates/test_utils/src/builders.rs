//! Test Data Builders
//!
//! Builders for entities whose tests usually care about one or two fields.

use chrono::NaiveDate;
use core_kernel::{CountryId, PokemonId, ReviewerId};
use domain_catalog::{Owner, Pokemon, Review};

use crate::fixtures::DateFixtures;

/// Builder for pokemon
pub struct PokemonBuilder {
    name: String,
    birth_date: NaiveDate,
    height: i32,
    weight: i32,
}

impl Default for PokemonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PokemonBuilder {
    pub fn new() -> Self {
        Self {
            name: "Bulbasaur".to_string(),
            birth_date: DateFixtures::first_generation(),
            height: 7,
            weight: 69,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = date;
        self
    }

    pub fn with_measurements(mut self, height: i32, weight: i32) -> Self {
        self.height = height;
        self.weight = weight;
        self
    }

    pub fn build(self) -> Pokemon {
        Pokemon::new(self.name, self.birth_date).with_measurements(self.height, self.weight)
    }
}

/// Builder for owners
pub struct OwnerBuilder {
    first_name: String,
    last_name: String,
    gym: String,
    country_id: CountryId,
}

impl OwnerBuilder {
    /// Starts an owner living in `country_id`
    pub fn new(country_id: CountryId) -> Self {
        Self {
            first_name: "Brock".to_string(),
            last_name: "Harrison".to_string(),
            gym: "Pewter Gym".to_string(),
            country_id,
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    pub fn with_gym(mut self, gym: impl Into<String>) -> Self {
        self.gym = gym.into();
        self
    }

    pub fn build(self) -> Owner {
        Owner::new(self.first_name, self.last_name, self.gym, self.country_id)
    }
}

/// Builder for reviews
pub struct ReviewBuilder {
    title: String,
    text: String,
    rating: i32,
    pokemon_id: PokemonId,
    reviewer_id: ReviewerId,
}

impl Default for ReviewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewBuilder {
    pub fn new() -> Self {
        Self {
            title: "Solid pick".to_string(),
            text: "Reliable in every battle".to_string(),
            rating: 4,
            pokemon_id: PokemonId::UNASSIGNED,
            reviewer_id: ReviewerId::UNASSIGNED,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_rating(mut self, rating: i32) -> Self {
        self.rating = rating;
        self
    }

    /// Attaches the review to a pokemon and its author
    pub fn about(mut self, pokemon_id: PokemonId, reviewer_id: ReviewerId) -> Self {
        self.pokemon_id = pokemon_id;
        self.reviewer_id = reviewer_id;
        self
    }

    pub fn build(self) -> Review {
        Review::new(self.title, self.text, self.rating).attach(self.pokemon_id, self.reviewer_id)
    }
}
