//! Repository implementations for the catalog entities
//!
//! Repositories are generic over the store they are handed at construction
//! (`S: Store + UnitOfWork`), so the same code runs against [`crate::MemoryStore`],
//! [`crate::PgStore`] or a [`crate::Session`].
//!
//! # Conventions
//!
//! - Reads return `Ok(None)` / empty vectors for missing rows, never an error
//! - Every mutation stages its changes and commits once
//! - A commit that affects no rows is reported as `Ok(false)`
//! - Store faults and constraint violations are `Err(RepositoryError)`

pub mod category;
pub mod country;
pub mod owner;
pub mod pokemon;
pub mod review;
pub mod reviewer;

pub use category::CategoryRepository;
pub use country::CountryRepository;
pub use owner::OwnerRepository;
pub use pokemon::{PokemonRepository, ReferencePolicy};
pub use review::ReviewRepository;
pub use reviewer::ReviewerRepository;

use core_kernel::{StoreError, UnitOfWork};
use tracing::{info, warn};

use crate::error::RepositoryError;

/// Commits the staged changes and reports whether any row was affected
pub(crate) async fn save<S: UnitOfWork>(
    store: &S,
    operation: &'static str,
) -> Result<bool, RepositoryError> {
    let affected = store.commit().await?;
    if affected == 0 {
        warn!(operation, "commit affected no rows");
        return Ok(false);
    }
    info!(operation, affected, "commit applied");
    Ok(true)
}

/// Like [`save`], but reports a unique violation raised at commit as a duplicate
///
/// The pre-write duplicate check and the commit are not atomic; a concurrent
/// writer can slip in between, and the store's unique index catches it.
///
/// `value` is the name this call attempted to write. The violation may come
/// from any row staged on the same store handle, so the colliding row is only
/// known through the store message that gets logged.
pub(crate) async fn save_unique<S: UnitOfWork>(
    store: &S,
    operation: &'static str,
    entity: &'static str,
    value: &str,
) -> Result<bool, RepositoryError> {
    match save(store, operation).await {
        Err(RepositoryError::Store(StoreError::UniqueViolation(message))) => {
            warn!(entity, attempted = value, %message, "duplicate rejected by the store");
            Err(RepositoryError::Duplicate {
                entity,
                value: value.to_string(),
                existing: None,
            })
        }
        other => other,
    }
}
