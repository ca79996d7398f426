//! Country repository

use core_kernel::{CountryId, Store, UnitOfWork};
use domain_catalog::{same_name, Country, Owner};
use tracing::{instrument, warn};

use crate::error::RepositoryError;
use crate::repositories::{save, save_unique};

/// Repository for countries and the owners living in them
#[derive(Debug, Clone)]
pub struct CountryRepository<S> {
    store: S,
}

impl<S: Store + UnitOfWork> CountryRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Country>, RepositoryError> {
        Ok(self.store.find(|_: &Country| true).await?)
    }

    pub async fn get(&self, id: CountryId) -> Result<Option<Country>, RepositoryError> {
        Ok(self.store.find_one(|country: &Country| country.id == id).await?)
    }

    pub async fn exists(&self, id: CountryId) -> Result<bool, RepositoryError> {
        Ok(self.get(id).await?.is_some())
    }

    pub async fn find_duplicate(&self, candidate: &Country) -> Result<Option<Country>, RepositoryError> {
        let name = candidate.name.clone();
        Ok(self
            .store
            .find_one(move |country: &Country| same_name(&country.name, &name))
            .await?)
    }

    /// Returns every owner belonging to the country
    pub async fn get_owners_from_country(&self, id: CountryId) -> Result<Vec<Owner>, RepositoryError> {
        Ok(self.store.find(|owner: &Owner| owner.country_id == id).await?)
    }

    #[instrument(skip(self, country), fields(name = %country.name))]
    pub async fn create(&self, country: Country) -> Result<bool, RepositoryError> {
        if let Some(existing) = self.find_duplicate(&country).await? {
            warn!(existing = %existing.id, "country already exists");
            return Err(RepositoryError::duplicate("Country", country.name, existing.id));
        }

        self.store.insert(country.clone()).await?;
        save_unique(&self.store, "create_country", "Country", &country.name).await
    }

    #[instrument(skip(self, country), fields(id = %country.id))]
    pub async fn update(&self, country: Country) -> Result<bool, RepositoryError> {
        self.store.update(country).await?;
        save(&self.store, "update_country").await
    }

    /// Deletes the country; fails while owners still belong to it
    #[instrument(skip(self, country), fields(id = %country.id))]
    pub async fn delete(&self, country: Country) -> Result<bool, RepositoryError> {
        self.store.delete(country).await?;
        save(&self.store, "delete_country").await
    }
}
