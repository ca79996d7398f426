//! Pre-built Test Fixtures
//!
//! Ready-to-use catalog entities. None of them carry an id; the store assigns
//! one when they are inserted.

use chrono::NaiveDate;
use core_kernel::CountryId;
use domain_catalog::{Category, Country, Owner, Pokemon, Review, Reviewer};

/// Fixture for dates used across the catalog
pub struct DateFixtures;

impl DateFixtures {
    /// Release date of the first generation (Feb 27, 1996)
    pub fn first_generation() -> NaiveDate {
        NaiveDate::from_ymd_opt(1996, 2, 27).unwrap()
    }

    /// Release date of the second generation (Nov 21, 1999)
    pub fn second_generation() -> NaiveDate {
        NaiveDate::from_ymd_opt(1999, 11, 21).unwrap()
    }
}

/// Fixture for catalog entities
pub struct CatalogFixtures;

impl CatalogFixtures {
    pub fn pikachu() -> Pokemon {
        Pokemon::new("Pikachu", DateFixtures::first_generation()).with_measurements(4, 60)
    }

    pub fn squirtle() -> Pokemon {
        Pokemon::new("Squirtle", DateFixtures::first_generation()).with_measurements(5, 90)
    }

    pub fn venusaur() -> Pokemon {
        Pokemon::new("Venusaur", DateFixtures::first_generation()).with_measurements(20, 1000)
    }

    pub fn electric() -> Category {
        Category::new("Electric")
    }

    pub fn water() -> Category {
        Category::new("Water")
    }

    pub fn leaf() -> Category {
        Category::new("Leaf")
    }

    pub fn kanto() -> Country {
        Country::new("Kanto")
    }

    pub fn saffron_city() -> Country {
        Country::new("Saffron City")
    }

    /// Trainer living in the given country
    pub fn jack(country_id: CountryId) -> Owner {
        Owner::new("Jack", "London", "Kanto", country_id)
    }

    pub fn harry(country_id: CountryId) -> Owner {
        Owner::new("Harry", "Potter", "Mistys Gym", country_id)
    }

    pub fn teddy() -> Reviewer {
        Reviewer::new("Teddy", "Smith")
    }

    pub fn taylor() -> Reviewer {
        Reviewer::new("Taylor", "Jones")
    }

    pub fn review(title: &str, rating: i32) -> Review {
        Review::new(title, format!("{} review text", title), rating)
    }
}
