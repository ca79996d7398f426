//! Pokemon repository
//!
//! Creating a pokemon stages three rows in one commit: the pokemon itself
//! and one join record each for its owner and its category. Deleting it
//! removes those join records with it. Reviews are never touched here; a
//! pokemon that still has reviews cannot be deleted.
//!
//! # Reference Policy
//!
//! With [`ReferencePolicy::Lenient`] (the default) an owner or category id
//! that does not resolve is accepted and the join record is stored with an
//! empty side. [`ReferencePolicy::Strict`] rejects it with
//! [`RepositoryError::MissingReference`] before anything is staged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CategoryId, OwnerId, PokemonId, Store, UnitOfWork};
use domain_catalog::{rating_of, Category, Owner, Pokemon, PokemonCategory, PokemonOwner, Review};
use tracing::{debug, instrument, warn};

use crate::error::RepositoryError;
use crate::repositories::{save, save_unique};

/// How `create` treats owner and category ids that do not resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// Link to nothing
    #[default]
    Lenient,
    /// Reject with `MissingReference`
    Strict,
}

impl ReferencePolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ReferencePolicy::Strict
        } else {
            ReferencePolicy::Lenient
        }
    }
}

/// Repository for pokemon, their join records and their rating
#[derive(Debug, Clone)]
pub struct PokemonRepository<S> {
    store: S,
    policy: ReferencePolicy,
}

impl<S: Store + UnitOfWork> PokemonRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: ReferencePolicy::default(),
        }
    }

    pub fn with_reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn reference_policy(&self) -> ReferencePolicy {
        self.policy
    }

    pub async fn list(&self) -> Result<Vec<Pokemon>, RepositoryError> {
        Ok(self.store.find(|_: &Pokemon| true).await?)
    }

    pub async fn get(&self, id: PokemonId) -> Result<Option<Pokemon>, RepositoryError> {
        Ok(self.store.find_one(|pokemon: &Pokemon| pokemon.id == id).await?)
    }

    /// Returns the pokemon with exactly this name
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Pokemon>, RepositoryError> {
        Ok(self.store.find_one(|pokemon: &Pokemon| pokemon.name == name).await?)
    }

    pub async fn exists(&self, id: PokemonId) -> Result<bool, RepositoryError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Returns the first pokemon whose name matches, ignoring case and surrounding whitespace
    pub async fn find_by_name_case_insensitive(&self, name: &str) -> Result<Option<Pokemon>, RepositoryError> {
        Ok(self.store.find_one(|pokemon: &Pokemon| pokemon.is_named(name)).await?)
    }

    /// Mean rating over the pokemon's reviews; zero when it has none
    pub async fn get_rating(&self, id: PokemonId) -> Result<Decimal, RepositoryError> {
        let reviews = self.store.find(|review: &Review| review.pokemon_id == id).await?;
        let rating = rating_of(&reviews);
        debug!(pokemon = %id, reviews = reviews.len(), %rating, "rating computed");
        Ok(rating)
    }

    #[instrument(skip(self, pokemon), fields(name = %pokemon.name, owner = %owner_id, category = %category_id))]
    pub async fn create(
        &self,
        owner_id: OwnerId,
        category_id: CategoryId,
        pokemon: Pokemon,
    ) -> Result<bool, RepositoryError> {
        if let Some(existing) = self.find_by_name_case_insensitive(&pokemon.name).await? {
            warn!(existing = %existing.id, "pokemon already exists");
            return Err(RepositoryError::duplicate("Pokemon", pokemon.name, existing.id));
        }

        let owner = self.store.find_one(|owner: &Owner| owner.id == owner_id).await?;
        let category = self
            .store
            .find_one(|category: &Category| category.id == category_id)
            .await?;
        self.check_reference("Owner", owner_id.value(), owner.is_some())?;
        self.check_reference("Category", category_id.value(), category.is_some())?;

        let pokemon = self.store.insert(pokemon).await?;
        self.store
            .insert(PokemonOwner::new(pokemon.id, owner.map(|owner| owner.id)))
            .await?;
        self.store
            .insert(PokemonCategory::new(pokemon.id, category.map(|category| category.id)))
            .await?;

        save_unique(&self.store, "create_pokemon", "Pokemon", &pokemon.name).await
    }

    /// Updates the pokemon row
    ///
    /// The owner and category ids are accepted for symmetry with `create`
    /// but the existing join records are left as they are.
    #[instrument(skip(self, pokemon), fields(id = %pokemon.id, owner = %owner_id, category = %category_id))]
    pub async fn update(
        &self,
        owner_id: OwnerId,
        category_id: CategoryId,
        pokemon: Pokemon,
    ) -> Result<bool, RepositoryError> {
        debug!("join records are not re-linked on update");
        self.store.update(pokemon).await?;
        save(&self.store, "update_pokemon").await
    }

    /// Deletes the pokemon together with its owner and category join records
    #[instrument(skip(self, pokemon), fields(id = %pokemon.id))]
    pub async fn delete(&self, pokemon: Pokemon) -> Result<bool, RepositoryError> {
        let id = pokemon.id;
        let owners = self.store.find(|link: &PokemonOwner| link.pokemon_id == id).await?;
        let categories = self
            .store
            .find(|link: &PokemonCategory| link.pokemon_id == id)
            .await?;
        debug!(owners = owners.len(), categories = categories.len(), "removing join records");

        self.store.delete_batch(owners).await?;
        self.store.delete_batch(categories).await?;
        self.store.delete(pokemon).await?;
        save(&self.store, "delete_pokemon").await
    }

    fn check_reference(&self, entity: &'static str, id: i64, found: bool) -> Result<(), RepositoryError> {
        if found {
            return Ok(());
        }
        match self.policy {
            ReferencePolicy::Strict => Err(RepositoryError::MissingReference { entity, id }),
            ReferencePolicy::Lenient => {
                warn!(entity, id, "reference does not resolve, linking to nothing");
                Ok(())
            }
        }
    }
}
