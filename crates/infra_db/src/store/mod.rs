//! Store implementations
//!
//! - [`MemoryStore`]: in-process tables with snapshot commits, used by tests
//!   and the `memory` backend of the API
//! - [`PgStore`]: PostgreSQL through SQLx
//!
//! [`Database`] is the long-lived handle held by the application; every unit
//! of work opens its own [`Session`] so staged changes never leak between
//! requests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::PgPool;

use core_kernel::{Entity, Store, StoreError, UnitOfWork};

pub use memory::{MemoryDatabase, MemoryStore};
pub use postgres::PgStore;

/// Backing database selected at startup
#[derive(Debug, Clone)]
pub enum Database {
    Memory(MemoryDatabase),
    Postgres(PgPool),
}

impl Database {
    /// Opens a session with an empty staging buffer
    pub fn session(&self) -> Session {
        match self {
            Database::Memory(database) => Session::Memory(database.session()),
            Database::Postgres(pool) => Session::Postgres(PgStore::new(pool.clone())),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Database::Memory(_) => "memory",
            Database::Postgres(_) => "postgres",
        }
    }
}

impl From<MemoryDatabase> for Database {
    fn from(database: MemoryDatabase) -> Self {
        Database::Memory(database)
    }
}

impl From<PgPool> for Database {
    fn from(pool: PgPool) -> Self {
        Database::Postgres(pool)
    }
}

/// One unit of work against either backend
#[derive(Debug, Clone)]
pub enum Session {
    Memory(MemoryStore),
    Postgres(PgStore),
}

#[async_trait]
impl Store for Session {
    async fn find<E, P>(&self, predicate: P) -> Result<Vec<E>, StoreError>
    where
        E: Entity,
        P: Fn(&E) -> bool + Send + Sync,
    {
        match self {
            Session::Memory(store) => store.find(predicate).await,
            Session::Postgres(store) => store.find(predicate).await,
        }
    }

    async fn insert<E: Entity>(&self, entity: E) -> Result<E, StoreError> {
        match self {
            Session::Memory(store) => store.insert(entity).await,
            Session::Postgres(store) => store.insert(entity).await,
        }
    }

    async fn update<E: Entity>(&self, entity: E) -> Result<(), StoreError> {
        match self {
            Session::Memory(store) => store.update(entity).await,
            Session::Postgres(store) => store.update(entity).await,
        }
    }

    async fn delete<E: Entity>(&self, entity: E) -> Result<(), StoreError> {
        match self {
            Session::Memory(store) => store.delete(entity).await,
            Session::Postgres(store) => store.delete(entity).await,
        }
    }
}

#[async_trait]
impl UnitOfWork for Session {
    async fn commit(&self) -> Result<u64, StoreError> {
        match self {
            Session::Memory(store) => store.commit().await,
            Session::Postgres(store) => store.commit().await,
        }
    }
}
