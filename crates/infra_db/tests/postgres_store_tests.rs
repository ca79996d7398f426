//! PgStore against a PostgreSQL container
//!
//! These tests start Docker containers and are ignored by default:
//! `cargo test -p infra_db -- --ignored`

use rust_decimal_macros::dec;

use core_kernel::{CategoryId, Store, StoreError, UnitOfWork};
use domain_catalog::{Category, PokemonCategory, PokemonOwner};
use infra_db::{CategoryRepository, PgStore, PokemonRepository, ReviewRepository};
use test_utils::{
    assert_duplicate, assert_foreign_key_violation, assert_saved, seed_catalog, CatalogFixtures,
    ReviewBuilder, TestDatabase,
};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_round_trip_through_postgres() {
    let db = TestDatabase::new().await.unwrap();
    let store = PgStore::new(db.pool().clone());
    let seeded = seed_catalog(&store).await.unwrap();

    let categories = CategoryRepository::new(store.clone());
    assert_eq!(categories.get(seeded.category.id).await.unwrap(), Some(seeded.category.clone()));
    assert_eq!(
        categories.get_pokemon_by_category(seeded.category.id).await.unwrap(),
        vec![seeded.pokemon.clone()]
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_rating_and_delete_scenario() {
    let db = TestDatabase::new().await.unwrap();
    let store = PgStore::new(db.pool().clone());
    let seeded = seed_catalog(&store).await.unwrap();

    let reviews = ReviewRepository::new(store.clone());
    for (title, rating) in [("Three", 3), ("Four", 4), ("Five", 5)] {
        assert_saved(
            reviews
                .create(
                    seeded.reviewer.id,
                    seeded.pokemon.id,
                    ReviewBuilder::new().with_title(title).with_rating(rating).build(),
                )
                .await,
        );
    }

    let pokemon = PokemonRepository::new(store.clone());
    assert_eq!(pokemon.get_rating(seeded.pokemon.id).await.unwrap(), dec!(4));
    assert_foreign_key_violation(pokemon.delete(seeded.pokemon.clone()).await);

    let written = reviews.get_reviews_of_a_pokemon(seeded.pokemon.id).await.unwrap();
    assert_saved(reviews.remove_reviews(written).await);
    assert_saved(pokemon.delete(seeded.pokemon.clone()).await);

    let id = seeded.pokemon.id;
    let owners: Vec<PokemonOwner> = store.find(|link: &PokemonOwner| link.pokemon_id == id).await.unwrap();
    let categories: Vec<PokemonCategory> =
        store.find(|link: &PokemonCategory| link.pokemon_id == id).await.unwrap();
    assert!(owners.is_empty());
    assert!(categories.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_rejects_padded_name() {
    let db = TestDatabase::new().await.unwrap();
    let store = PgStore::new(db.pool().clone());
    store.insert(Category::new("Electric")).await.unwrap();
    store.commit().await.unwrap();

    store.insert(Category::new(" electric ")).await.unwrap();
    let error = store.commit().await.unwrap_err();
    assert!(matches!(error, StoreError::UniqueViolation(_)));

    assert_duplicate(
        CategoryRepository::new(store).create(Category::new("ELECTRIC")).await,
        "Category",
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_missing_row_update_returns_false() {
    let db = TestDatabase::new().await.unwrap();
    let store = PgStore::new(db.pool().clone());

    let mut ghost = CatalogFixtures::leaf();
    ghost.id = CategoryId::new(404);
    assert!(!CategoryRepository::new(store).update(ghost).await.unwrap());
}
