//! Repository behaviour over the in-memory store

use async_trait::async_trait;
use rust_decimal_macros::dec;

use core_kernel::{
    CategoryId, Entity, OwnerId, PokemonId, ReviewId, ReviewerId, Store, StoreError, UnitOfWork,
};
use domain_catalog::{Category, Pokemon, PokemonCategory, PokemonOwner, Review};
use infra_db::{
    CategoryRepository, MemoryStore, OwnerRepository, PokemonRepository, RepositoryError,
    ReviewRepository, ReviewerRepository,
};
use test_utils::{
    assert_duplicate, assert_foreign_key_violation, assert_rating_eq, assert_saved,
    seeded_memory_store, CatalogFixtures, PokemonBuilder, ReviewBuilder, SeededCatalog,
};

async fn links_of(store: &MemoryStore, pokemon_id: PokemonId) -> (Vec<PokemonOwner>, Vec<PokemonCategory>) {
    let owners = store
        .find(|link: &PokemonOwner| link.pokemon_id == pokemon_id)
        .await
        .unwrap();
    let categories = store
        .find(|link: &PokemonCategory| link.pokemon_id == pokemon_id)
        .await
        .unwrap();
    (owners, categories)
}

async fn review(store: &MemoryStore, seeded: &SeededCatalog, title: &str, rating: i32) {
    let repository = ReviewRepository::new(store.clone());
    assert_saved(
        repository
            .create(
                seeded.reviewer.id,
                seeded.pokemon.id,
                ReviewBuilder::new().with_title(title).with_rating(rating).build(),
            )
            .await,
    );
}

// ============================================================================
// Rating
// ============================================================================

mod rating_tests {
    use super::*;

    #[tokio::test]
    async fn test_rating_without_reviews_is_zero() {
        let (store, seeded) = seeded_memory_store().await.unwrap();
        let repository = PokemonRepository::new(store);

        let rating = repository.get_rating(seeded.pokemon.id).await.unwrap();
        assert_eq!(rating, dec!(0));
    }

    #[tokio::test]
    async fn test_rating_is_exact_mean() {
        let (store, seeded) = seeded_memory_store().await.unwrap();
        review(&store, &seeded, "Three", 3).await;
        review(&store, &seeded, "Four", 4).await;
        review(&store, &seeded, "Five", 5).await;

        let repository = PokemonRepository::new(store);
        let first = repository.get_rating(seeded.pokemon.id).await.unwrap();
        let second = repository.get_rating(seeded.pokemon.id).await.unwrap();
        assert_rating_eq(first, dec!(4));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_rating_ignores_other_pokemon() {
        let (store, seeded) = seeded_memory_store().await.unwrap();
        review(&store, &seeded, "Only", 2).await;

        let repository = PokemonRepository::new(store);
        assert_eq!(repository.get_rating(PokemonId::new(999)).await.unwrap(), dec!(0));
        assert_rating_eq(repository.get_rating(seeded.pokemon.id).await.unwrap(), dec!(2));
    }
}

// ============================================================================
// Duplicate Detection
// ============================================================================

mod duplicate_tests {
    use super::*;

    #[tokio::test]
    async fn test_padded_pokemon_name_is_duplicate() {
        let store = MemoryStore::new();
        let repository = PokemonRepository::new(store);
        assert_saved(
            repository
                .create(OwnerId::new(1), CategoryId::new(1), PokemonBuilder::new().with_name("pikachu").build())
                .await,
        );

        let result = repository
            .create(OwnerId::new(1), CategoryId::new(1), PokemonBuilder::new().with_name("Pikachu ").build())
            .await;
        assert_duplicate(result, "Pokemon");
        assert_eq!(repository.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_carries_existing_id() {
        let (store, seeded) = seeded_memory_store().await.unwrap();
        let repository = CategoryRepository::new(store);

        let error = repository.create(Category::new("ELECTRIC")).await.unwrap_err();
        match error {
            RepositoryError::Duplicate { existing, value, .. } => {
                assert_eq!(existing, Some(seeded.category.id.value()));
                assert_eq!(value, "ELECTRIC");
            }
            other => panic!("expected duplicate, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unique_violation_at_commit_is_duplicate() {
        let (store, _) = seeded_memory_store().await.unwrap();
        let racing = store.database().session();

        // Staged by a session that skipped the pre-write check
        racing.insert(CatalogFixtures::taylor()).await.unwrap();
        assert_saved(
            ReviewerRepository::new(store.clone())
                .create(CatalogFixtures::taylor())
                .await,
        );

        let result = ReviewerRepository::new(racing)
            .create(domain_catalog::Reviewer::new("Ash", "Brown"))
            .await;
        // The index cannot say which staged row collided; the error names the attempted write
        match result {
            Err(RepositoryError::Duplicate { entity, value, existing }) => {
                assert_eq!(entity, "Reviewer");
                assert_eq!(value, "Brown");
                assert_eq!(existing, None);
            }
            other => panic!("expected duplicate, got {:?}", other),
        }
        assert_eq!(ReviewerRepository::new(store).list().await.unwrap().len(), 2);
    }
}

// ============================================================================
// Join Records
// ============================================================================

mod join_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_links_owner_and_category_once() {
        let (store, seeded) = seeded_memory_store().await.unwrap();
        let repository = PokemonRepository::new(store.clone());
        assert_saved(
            repository
                .create(seeded.owner.id, seeded.category.id, CatalogFixtures::squirtle())
                .await,
        );

        let squirtle = repository.get_by_name("Squirtle").await.unwrap().unwrap();
        let (owners, categories) = links_of(&store, squirtle.id).await;
        assert_eq!(owners, vec![PokemonOwner::new(squirtle.id, Some(seeded.owner.id))]);
        assert_eq!(categories, vec![PokemonCategory::new(squirtle.id, Some(seeded.category.id))]);

        let owned = OwnerRepository::new(store)
            .get_pokemon_by_owner(seeded.owner.id)
            .await
            .unwrap();
        assert_eq!(owned.len(), 2);
    }

    #[tokio::test]
    async fn test_update_leaves_links_alone() {
        let (store, seeded) = seeded_memory_store().await.unwrap();
        let other_owner = store.insert(CatalogFixtures::harry(seeded.country.id)).await.unwrap();
        let other_category = store.insert(CatalogFixtures::water()).await.unwrap();
        store.commit().await.unwrap();

        let repository = PokemonRepository::new(store.clone());
        let before = links_of(&store, seeded.pokemon.id).await;

        let mut renamed = seeded.pokemon.clone();
        renamed.weight = 61;
        assert_saved(repository.update(other_owner.id, other_category.id, renamed).await);

        assert_eq!(links_of(&store, seeded.pokemon.id).await, before);
        assert_eq!(repository.get(seeded.pokemon.id).await.unwrap().unwrap().weight, 61);
    }

    #[tokio::test]
    async fn test_category_traversal() {
        let (store, seeded) = seeded_memory_store().await.unwrap();
        let repository = CategoryRepository::new(store);

        let filed = repository.get_pokemon_by_category(seeded.category.id).await.unwrap();
        assert_eq!(filed, vec![seeded.pokemon.clone()]);
        assert!(repository
            .get_pokemon_by_category(CategoryId::new(404))
            .await
            .unwrap()
            .is_empty());
    }
}

// ============================================================================
// Deletion
// ============================================================================

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_pokemon_after_removing_reviews() {
        let (store, seeded) = seeded_memory_store().await.unwrap();
        review(&store, &seeded, "Zappy", 5).await;
        review(&store, &seeded, "Cute", 4).await;

        let pokemon = PokemonRepository::new(store.clone());
        let reviews = ReviewRepository::new(store.clone());

        // Reviews still point at the pokemon
        assert_foreign_key_violation(pokemon.delete(seeded.pokemon.clone()).await);
        assert!(pokemon.exists(seeded.pokemon.id).await.unwrap());

        let written = reviews.get_reviews_of_a_pokemon(seeded.pokemon.id).await.unwrap();
        assert_eq!(written.len(), 2);
        assert_saved(reviews.remove_reviews(written).await);
        assert_saved(pokemon.delete(seeded.pokemon.clone()).await);

        assert!(!pokemon.exists(seeded.pokemon.id).await.unwrap());
        assert!(reviews.get_reviews_of_a_pokemon(seeded.pokemon.id).await.unwrap().is_empty());
        let (owners, categories) = links_of(&store, seeded.pokemon.id).await;
        assert!(owners.is_empty());
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn test_linked_owner_cannot_be_deleted() {
        let (store, seeded) = seeded_memory_store().await.unwrap();
        let owners = OwnerRepository::new(store);
        assert_foreign_key_violation(owners.delete(seeded.owner.clone()).await);
        assert!(owners.exists(seeded.owner.id).await.unwrap());
    }
}

// ============================================================================
// Zero-Row Commits
// ============================================================================

mod zero_row_tests {
    use super::*;

    /// Accepts every staged command and reports that the commit touched nothing
    #[derive(Debug, Clone, Default)]
    struct NullStore;

    #[async_trait]
    impl Store for NullStore {
        async fn find<E, P>(&self, _predicate: P) -> Result<Vec<E>, StoreError>
        where
            E: Entity,
            P: Fn(&E) -> bool + Send + Sync,
        {
            Ok(Vec::new())
        }

        async fn insert<E: Entity>(&self, entity: E) -> Result<E, StoreError> {
            Ok(entity)
        }

        async fn update<E: Entity>(&self, _entity: E) -> Result<(), StoreError> {
            Ok(())
        }

        async fn delete<E: Entity>(&self, _entity: E) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[async_trait]
    impl UnitOfWork for NullStore {
        async fn commit(&self) -> Result<u64, StoreError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_create_category_without_rows_returns_false() {
        let repository = CategoryRepository::new(NullStore);
        assert!(!repository.create(Category::new("Electric")).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_pokemon_without_rows_returns_false() {
        let repository = PokemonRepository::new(NullStore);
        let saved = repository
            .create(OwnerId::new(1), CategoryId::new(1), CatalogFixtures::squirtle())
            .await
            .unwrap();
        assert!(!saved);
    }

    #[tokio::test]
    async fn test_create_review_without_rows_returns_false() {
        let repository = ReviewRepository::new(NullStore);
        let saved = repository
            .create(
                ReviewerId::new(1),
                PokemonId::new(1),
                CatalogFixtures::review("Nothing", 3),
            )
            .await
            .unwrap();
        assert!(!saved);
    }

    fn phantom_pokemon() -> Pokemon {
        let mut pokemon = CatalogFixtures::venusaur();
        pokemon.id = PokemonId::new(321);
        pokemon
    }

    #[tokio::test]
    async fn test_update_missing_pokemon_returns_false() {
        let repository = PokemonRepository::new(MemoryStore::new());
        let saved = repository
            .update(OwnerId::new(1), CategoryId::new(1), phantom_pokemon())
            .await
            .unwrap();
        assert!(!saved);
    }

    #[tokio::test]
    async fn test_delete_missing_review_returns_false() {
        let repository = ReviewRepository::new(MemoryStore::new());
        let mut ghost: Review = CatalogFixtures::review("Ghost", 1);
        ghost.id = ReviewId::new(77);
        assert!(!repository.delete(ghost).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_pokemon_returns_false() {
        let repository = PokemonRepository::new(MemoryStore::new());
        assert!(!repository.delete(phantom_pokemon()).await.unwrap());
    }
}

// ============================================================================
// Properties
// ============================================================================

mod property_tests {
    use super::*;
    use domain_catalog::average_rating;
    use proptest::prelude::*;
    use test_utils::{name_strategy, name_variant_strategy, ratings_strategy};

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_rating_is_average_of_stored_reviews(ratings in ratings_strategy()) {
            let rating = block_on(async {
                let (store, seeded) = seeded_memory_store().await.unwrap();
                for (index, &value) in ratings.iter().enumerate() {
                    review(&store, &seeded, &format!("Review {}", index), value).await;
                }
                PokemonRepository::new(store).get_rating(seeded.pokemon.id).await.unwrap()
            });
            prop_assert_eq!(rating, average_rating(ratings));
        }

        #[test]
        fn prop_name_variant_is_duplicate(
            (name, variant) in name_strategy().prop_flat_map(|name| {
                (Just(name.clone()), name_variant_strategy(name))
            })
        ) {
            let (first, second, stored) = block_on(async {
                let repository = CategoryRepository::new(MemoryStore::new());
                let first = repository.create(Category::new(name)).await;
                let second = repository.create(Category::new(variant)).await;
                (first, second, repository.list().await.unwrap().len())
            });
            prop_assert!(matches!(first, Ok(true)));
            let second_is_duplicate = matches!(second, Err(RepositoryError::Duplicate { .. }));
            prop_assert!(second_is_duplicate);
            prop_assert_eq!(stored, 1);
        }
    }
}
