//! Review repository
//!
//! Reviews point at one pokemon and one reviewer. Those references are not
//! checked here; a dangling one is rejected by the store's foreign keys when
//! the review is committed.

use core_kernel::{PokemonId, ReviewId, ReviewerId, Store, UnitOfWork};
use domain_catalog::{same_name, Review};
use tracing::{debug, instrument, warn};

use crate::error::RepositoryError;
use crate::repositories::{save, save_unique};

/// Repository for reviews
#[derive(Debug, Clone)]
pub struct ReviewRepository<S> {
    store: S,
}

impl<S: Store + UnitOfWork> ReviewRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Review>, RepositoryError> {
        Ok(self.store.find(|_: &Review| true).await?)
    }

    pub async fn get(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError> {
        Ok(self.store.find_one(|review: &Review| review.id == id).await?)
    }

    pub async fn exists(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Returns the stored review with the candidate's title
    pub async fn find_duplicate(&self, candidate: &Review) -> Result<Option<Review>, RepositoryError> {
        let title = candidate.title.clone();
        Ok(self
            .store
            .find_one(move |review: &Review| same_name(&review.title, &title))
            .await?)
    }

    pub async fn get_reviews_of_a_pokemon(&self, pokemon_id: PokemonId) -> Result<Vec<Review>, RepositoryError> {
        Ok(self.store.find(|review: &Review| review.pokemon_id == pokemon_id).await?)
    }

    /// Attaches the review to its pokemon and author, then stores it
    #[instrument(skip(self, review), fields(title = %review.title, pokemon = %pokemon_id, reviewer = %reviewer_id))]
    pub async fn create(
        &self,
        reviewer_id: ReviewerId,
        pokemon_id: PokemonId,
        review: Review,
    ) -> Result<bool, RepositoryError> {
        if let Some(existing) = self.find_duplicate(&review).await? {
            warn!(existing = %existing.id, "review already exists");
            return Err(RepositoryError::duplicate("Review", review.title, existing.id));
        }

        let review = review.attach(pokemon_id, reviewer_id);
        self.store.insert(review.clone()).await?;
        save_unique(&self.store, "create_review", "Review", &review.title).await
    }

    #[instrument(skip(self, review), fields(id = %review.id))]
    pub async fn update(&self, review: Review) -> Result<bool, RepositoryError> {
        self.store.update(review).await?;
        save(&self.store, "update_review").await
    }

    #[instrument(skip(self, review), fields(id = %review.id))]
    pub async fn delete(&self, review: Review) -> Result<bool, RepositoryError> {
        self.store.delete(review).await?;
        save(&self.store, "delete_review").await
    }

    /// Deletes every given review in one commit
    ///
    /// An empty list stages nothing and reports `false`.
    #[instrument(skip(self, reviews), fields(count = reviews.len()))]
    pub async fn remove_reviews(&self, reviews: Vec<Review>) -> Result<bool, RepositoryError> {
        if reviews.is_empty() {
            debug!("no reviews to remove");
        }
        self.store.delete_batch(reviews).await?;
        save(&self.store, "remove_reviews").await
    }
}
