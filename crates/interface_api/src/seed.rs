//! Sample catalog for local development
//!
//! Loaded by `pokedex-api seeddata`. Everything goes through the
//! repositories, so the sample data obeys the same duplicate and reference
//! rules as API traffic. An already populated catalog is left untouched.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use core_kernel::{OwnerId, PokemonId, ReviewerId};
use domain_catalog::{Category, Country, Owner, Pokemon, Review, Reviewer};
use infra_db::{
    CategoryRepository, CountryRepository, Database, OwnerRepository, PokemonRepository,
    RepositoryError, ReviewRepository, ReviewerRepository, Session,
};

/// Seeding failures
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Invalid sample date: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("{0} was not stored")]
    NotStored(&'static str),
}

/// Sample pokemon: name, birth date, category, owner (first, last, gym, country)
struct SamplePokemon {
    name: &'static str,
    birth_date: &'static str,
    category: &'static str,
    owner: (&'static str, &'static str, &'static str, &'static str),
    reviews: &'static [(&'static str, &'static str, i32, usize)],
}

const REVIEWERS: [(&str, &str); 3] = [("Teddy", "Smith"), ("Taylor", "Jones"), ("Jessica", "McGregor")];

const SAMPLES: [SamplePokemon; 3] = [
    SamplePokemon {
        name: "Pikachu",
        birth_date: "1903-01-01",
        category: "Electric",
        owner: ("Jack", "London", "Brocks Gym", "Kanto"),
        reviews: &[
            ("Pikachu rocks", "Pikachu is the best pokemon, because it is electric", 5, 0),
            ("Pikachu fights", "Pikachu is the best at killing rocks", 5, 1),
            ("Pikachu disappoints", "Pikachu, pikachu, pikachu", 1, 2),
        ],
    },
    SamplePokemon {
        name: "Squirtle",
        birth_date: "1903-01-01",
        category: "Water",
        owner: ("Harry", "Potter", "Mistys Gym", "Saffron City"),
        reviews: &[
            ("Squirtle rocks", "Squirtle is the best pokemon, because it is water", 5, 0),
            ("Squirtle fights", "Squirtle is the best at putting out fires", 5, 1),
            ("Squirtle disappoints", "Squirtle, squirtle, squirtle", 1, 2),
        ],
    },
    SamplePokemon {
        name: "Venusaur",
        birth_date: "1903-01-01",
        category: "Leaf",
        owner: ("Ash", "Ketchum", "Ashs Gym", "Millet Town"),
        reviews: &[
            ("Venusaur rocks", "Venusaur is the best pokemon, because it is leaf", 5, 0),
            ("Venusaur fights", "Venusaur is the best at the grass game", 5, 1),
            ("Venusaur disappoints", "Venusaur, venusaur, venusaur", 1, 2),
        ],
    },
];

/// Populates an empty catalog; returns `false` when data was already present
pub async fn seed_catalog(database: &Database) -> Result<bool, SeedError> {
    let session = database.session();
    if !PokemonRepository::new(session.clone()).list().await?.is_empty() {
        info!("catalog already populated, skipping seed");
        return Ok(false);
    }

    let mut reviewers = Vec::with_capacity(REVIEWERS.len());
    for (first, last) in REVIEWERS {
        reviewers.push(seed_reviewer(&session, Reviewer::new(first, last)).await?);
    }

    for sample in &SAMPLES {
        let owner_id = seed_owner(&session, sample.owner).await?;
        let category = seed_category(&session, sample.category).await?;

        let pokemon = Pokemon::new(sample.name, sample.birth_date.parse::<NaiveDate>()?);
        let repository = PokemonRepository::new(session.clone());
        repository.create(owner_id, category, pokemon).await?;
        let pokemon_id = repository
            .find_by_name_case_insensitive(sample.name)
            .await?
            .map(|pokemon| pokemon.id)
            .ok_or(SeedError::NotStored("Pokemon"))?;

        seed_reviews(&session, pokemon_id, sample.reviews, &reviewers).await?;
    }

    info!(pokemon = SAMPLES.len(), reviewers = reviewers.len(), "catalog seeded");
    Ok(true)
}

async fn seed_reviewer(session: &Session, reviewer: Reviewer) -> Result<ReviewerId, SeedError> {
    let repository = ReviewerRepository::new(session.clone());
    repository.create(reviewer.clone()).await?;
    repository
        .find_duplicate(&reviewer)
        .await?
        .map(|reviewer| reviewer.id)
        .ok_or(SeedError::NotStored("Reviewer"))
}

async fn seed_owner(
    session: &Session,
    (first, last, gym, country): (&str, &str, &str, &str),
) -> Result<OwnerId, SeedError> {
    let countries = CountryRepository::new(session.clone());
    let country = Country::new(country);
    countries.create(country.clone()).await?;
    let country_id = countries
        .find_duplicate(&country)
        .await?
        .map(|country| country.id)
        .ok_or(SeedError::NotStored("Country"))?;

    let owners = OwnerRepository::new(session.clone());
    let owner = Owner::new(first, last, gym, country_id);
    owners.create(owner.clone()).await?;
    owners
        .find_duplicate(&owner)
        .await?
        .map(|owner| owner.id)
        .ok_or(SeedError::NotStored("Owner"))
}

async fn seed_category(session: &Session, name: &str) -> Result<core_kernel::CategoryId, SeedError> {
    let repository = CategoryRepository::new(session.clone());
    let category = Category::new(name);
    repository.create(category.clone()).await?;
    repository
        .find_duplicate(&category)
        .await?
        .map(|category| category.id)
        .ok_or(SeedError::NotStored("Category"))
}

async fn seed_reviews(
    session: &Session,
    pokemon_id: PokemonId,
    reviews: &[(&str, &str, i32, usize)],
    reviewers: &[ReviewerId],
) -> Result<(), SeedError> {
    let repository = ReviewRepository::new(session.clone());
    for &(title, text, rating, author) in reviews {
        let reviewer_id = reviewers
            .get(author)
            .copied()
            .ok_or(SeedError::NotStored("Reviewer"))?;
        repository
            .create(reviewer_id, pokemon_id, Review::new(title, text, rating))
            .await?;
    }
    Ok(())
}
