//! Category repository

use std::collections::BTreeSet;

use core_kernel::{CategoryId, Store, UnitOfWork};
use domain_catalog::{same_name, Category, Pokemon, PokemonCategory};
use tracing::{instrument, warn};

use crate::error::RepositoryError;
use crate::repositories::{save, save_unique};

/// Repository for categories and the pokemon filed under them
#[derive(Debug, Clone)]
pub struct CategoryRepository<S> {
    store: S,
}

impl<S: Store + UnitOfWork> CategoryRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns every category ordered by id
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.store.find(|_: &Category| true).await?)
    }

    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        Ok(self.store.find_one(|category: &Category| category.id == id).await?)
    }

    pub async fn exists(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Returns the stored category whose name matches the candidate's, ignoring case and padding
    pub async fn find_duplicate(&self, candidate: &Category) -> Result<Option<Category>, RepositoryError> {
        let name = candidate.name.clone();
        Ok(self
            .store
            .find_one(move |category: &Category| same_name(&category.name, &name))
            .await?)
    }

    /// Returns the pokemon linked to the category through join records
    pub async fn get_pokemon_by_category(&self, id: CategoryId) -> Result<Vec<Pokemon>, RepositoryError> {
        let linked: BTreeSet<_> = self
            .store
            .find(|link: &PokemonCategory| link.category_id == Some(id))
            .await?
            .into_iter()
            .map(|link| link.pokemon_id)
            .collect();

        Ok(self
            .store
            .find(move |pokemon: &Pokemon| linked.contains(&pokemon.id))
            .await?)
    }

    #[instrument(skip(self, category), fields(name = %category.name))]
    pub async fn create(&self, category: Category) -> Result<bool, RepositoryError> {
        if let Some(existing) = self.find_duplicate(&category).await? {
            warn!(existing = %existing.id, "category already exists");
            return Err(RepositoryError::duplicate("Category", category.name, existing.id));
        }

        self.store.insert(category.clone()).await?;
        save_unique(&self.store, "create_category", "Category", &category.name).await
    }

    #[instrument(skip(self, category), fields(id = %category.id))]
    pub async fn update(&self, category: Category) -> Result<bool, RepositoryError> {
        self.store.update(category).await?;
        save(&self.store, "update_category").await
    }

    /// Deletes the category; fails while pokemon are still filed under it
    #[instrument(skip(self, category), fields(id = %category.id))]
    pub async fn delete(&self, category: Category) -> Result<bool, RepositoryError> {
        self.store.delete(category).await?;
        save(&self.store, "delete_category").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_create_then_get() {
        let repository = CategoryRepository::new(MemoryStore::new());
        assert!(repository.create(Category::new("Electric")).await.unwrap());

        let stored = repository.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(repository.exists(stored[0].id).await.unwrap());
        assert_eq!(repository.get(stored[0].id).await.unwrap(), Some(stored[0].clone()));
    }

    #[tokio::test]
    async fn test_missing_category_is_absent() {
        let repository = CategoryRepository::new(MemoryStore::new());
        assert_eq!(repository.get(CategoryId::new(5)).await.unwrap(), None);
        assert!(!repository.exists(CategoryId::new(5)).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let repository = CategoryRepository::new(MemoryStore::new());
        repository.create(Category::new("Fire")).await.unwrap();

        let error = repository.create(Category::new(" fire")).await.unwrap_err();
        assert!(matches!(
            error,
            RepositoryError::Duplicate { entity: "Category", existing: Some(1), .. }
        ));
    }

    #[tokio::test]
    async fn test_update_of_missing_category_returns_false() {
        let repository = CategoryRepository::new(MemoryStore::new());
        let mut ghost = Category::new("Ghost");
        ghost.id = CategoryId::new(3);

        assert!(!repository.update(ghost.clone()).await.unwrap());
        assert!(!repository.delete(ghost).await.unwrap());
    }
}
