//! Owner repository
//!
//! Owners are linked to pokemon through `pokemon_owners` join records and
//! belong to exactly one country. Duplicates are detected on the last name.

use std::collections::BTreeSet;

use core_kernel::{OwnerId, PokemonId, Store, UnitOfWork};
use domain_catalog::{same_name, Country, Owner, Pokemon, PokemonOwner};
use tracing::{instrument, warn};

use crate::error::RepositoryError;
use crate::repositories::{save, save_unique};

/// Repository for owners and their pokemon
#[derive(Debug, Clone)]
pub struct OwnerRepository<S> {
    store: S,
}

impl<S: Store + UnitOfWork> OwnerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Owner>, RepositoryError> {
        Ok(self.store.find(|_: &Owner| true).await?)
    }

    pub async fn get(&self, id: OwnerId) -> Result<Option<Owner>, RepositoryError> {
        Ok(self.store.find_one(|owner: &Owner| owner.id == id).await?)
    }

    pub async fn exists(&self, id: OwnerId) -> Result<bool, RepositoryError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Returns the stored owner sharing the candidate's last name
    pub async fn find_duplicate(&self, candidate: &Owner) -> Result<Option<Owner>, RepositoryError> {
        let last_name = candidate.last_name.clone();
        Ok(self
            .store
            .find_one(move |owner: &Owner| same_name(&owner.last_name, &last_name))
            .await?)
    }

    /// Returns the pokemon the owner is linked to
    pub async fn get_pokemon_by_owner(&self, id: OwnerId) -> Result<Vec<Pokemon>, RepositoryError> {
        let linked: BTreeSet<_> = self
            .store
            .find(|link: &PokemonOwner| link.owner_id == Some(id))
            .await?
            .into_iter()
            .map(|link| link.pokemon_id)
            .collect();

        Ok(self
            .store
            .find(move |pokemon: &Pokemon| linked.contains(&pokemon.id))
            .await?)
    }

    /// Returns the owners linked to a pokemon
    pub async fn get_owners_of_a_pokemon(&self, pokemon_id: PokemonId) -> Result<Vec<Owner>, RepositoryError> {
        let linked: BTreeSet<_> = self
            .store
            .find(|link: &PokemonOwner| link.pokemon_id == pokemon_id)
            .await?
            .into_iter()
            .filter_map(|link| link.owner_id)
            .collect();

        Ok(self
            .store
            .find(move |owner: &Owner| linked.contains(&owner.id))
            .await?)
    }

    /// Returns the owner's country, or `None` when the owner does not exist
    pub async fn get_country_of_owner(&self, id: OwnerId) -> Result<Option<Country>, RepositoryError> {
        let Some(owner) = self.get(id).await? else {
            return Ok(None);
        };
        let country_id = owner.country_id;
        Ok(self
            .store
            .find_one(move |country: &Country| country.id == country_id)
            .await?)
    }

    #[instrument(skip(self, owner), fields(last_name = %owner.last_name, country = %owner.country_id))]
    pub async fn create(&self, owner: Owner) -> Result<bool, RepositoryError> {
        if let Some(existing) = self.find_duplicate(&owner).await? {
            warn!(existing = %existing.id, "owner already exists");
            return Err(RepositoryError::duplicate("Owner", owner.last_name, existing.id));
        }

        self.store.insert(owner.clone()).await?;
        save_unique(&self.store, "create_owner", "Owner", &owner.last_name).await
    }

    #[instrument(skip(self, owner), fields(id = %owner.id))]
    pub async fn update(&self, owner: Owner) -> Result<bool, RepositoryError> {
        self.store.update(owner).await?;
        save(&self.store, "update_owner").await
    }

    /// Deletes the owner; fails while pokemon are still linked to it
    #[instrument(skip(self, owner), fields(id = %owner.id))]
    pub async fn delete(&self, owner: Owner) -> Result<bool, RepositoryError> {
        self.store.delete(owner).await?;
        save(&self.store, "delete_owner").await
    }
}
