//! Reviewer repository

use core_kernel::{ReviewerId, Store, UnitOfWork};
use domain_catalog::{same_name, Review, Reviewer};
use tracing::{instrument, warn};

use crate::error::RepositoryError;
use crate::repositories::{save, save_unique};

/// Repository for reviewers
///
/// Reviewers are unique by last name, the same rule as owners.
#[derive(Debug, Clone)]
pub struct ReviewerRepository<S> {
    store: S,
}

impl<S: Store + UnitOfWork> ReviewerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Reviewer>, RepositoryError> {
        Ok(self.store.find(|_: &Reviewer| true).await?)
    }

    pub async fn get(&self, id: ReviewerId) -> Result<Option<Reviewer>, RepositoryError> {
        Ok(self.store.find_one(|reviewer: &Reviewer| reviewer.id == id).await?)
    }

    pub async fn exists(&self, id: ReviewerId) -> Result<bool, RepositoryError> {
        Ok(self.get(id).await?.is_some())
    }

    pub async fn find_duplicate(&self, candidate: &Reviewer) -> Result<Option<Reviewer>, RepositoryError> {
        let last_name = candidate.last_name.clone();
        Ok(self
            .store
            .find_one(move |reviewer: &Reviewer| same_name(&reviewer.last_name, &last_name))
            .await?)
    }

    /// Returns every review written by the reviewer
    pub async fn get_reviews_by_reviewer(&self, id: ReviewerId) -> Result<Vec<Review>, RepositoryError> {
        Ok(self.store.find(|review: &Review| review.reviewer_id == id).await?)
    }

    #[instrument(skip(self, reviewer), fields(last_name = %reviewer.last_name))]
    pub async fn create(&self, reviewer: Reviewer) -> Result<bool, RepositoryError> {
        if let Some(existing) = self.find_duplicate(&reviewer).await? {
            warn!(existing = %existing.id, "reviewer already exists");
            return Err(RepositoryError::duplicate("Reviewer", reviewer.last_name, existing.id));
        }

        self.store.insert(reviewer.clone()).await?;
        save_unique(&self.store, "create_reviewer", "Reviewer", &reviewer.last_name).await
    }

    #[instrument(skip(self, reviewer), fields(id = %reviewer.id))]
    pub async fn update(&self, reviewer: Reviewer) -> Result<bool, RepositoryError> {
        self.store.update(reviewer).await?;
        save(&self.store, "update_reviewer").await
    }

    /// Deletes the reviewer; fails while any of their reviews remain
    #[instrument(skip(self, reviewer), fields(id = %reviewer.id))]
    pub async fn delete(&self, reviewer: Reviewer) -> Result<bool, RepositoryError> {
        self.store.delete(reviewer).await?;
        save(&self.store, "delete_reviewer").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_crud_cycle() {
        let repository = ReviewerRepository::new(MemoryStore::new());
        assert!(repository.create(Reviewer::new("Teddy", "Smith")).await.unwrap());

        let mut teddy = repository.list().await.unwrap().remove(0);
        teddy.first_name = "Theodore".to_string();
        assert!(repository.update(teddy.clone()).await.unwrap());
        assert_eq!(repository.get(teddy.id).await.unwrap(), Some(teddy.clone()));

        assert!(repository.delete(teddy.clone()).await.unwrap());
        assert!(!repository.exists(teddy.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_no_reviews_for_new_reviewer() {
        let repository = ReviewerRepository::new(MemoryStore::new());
        repository.create(Reviewer::new("Taylor", "Jones")).await.unwrap();
        let taylor = repository.list().await.unwrap().remove(0);
        assert!(repository.get_reviews_by_reviewer(taylor.id).await.unwrap().is_empty());
    }
}
