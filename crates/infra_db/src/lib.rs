//! Infrastructure Database Layer
//!
//! Repositories for the pokedex catalog, written against the store contract
//! of `core_kernel`, plus the two stores that implement it.
//!
//! # Architecture
//!
//! Repositories stage inserts, updates and deletes on the store handle they
//! were built with and commit once per operation. A commit that affects no
//! rows is reported as `Ok(false)`; constraint violations and store faults
//! are errors.
//!
//! # Stores
//!
//! - [`MemoryStore`]: in-process tables, foreign keys and natural keys checked
//!   at commit
//! - [`PgStore`]: PostgreSQL through SQLx, one transaction per commit
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, apply_schema, Database, DatabaseConfig, PokemonRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/pokedex")).await?;
//! apply_schema(&pool).await?;
//! let database = Database::Postgres(pool);
//! let pokemon = PokemonRepository::new(database.session());
//! let rating = pokemon.get_rating(pikachu_id).await?;
//! ```

pub mod error;
pub mod pool;
pub mod repositories;
pub mod schema;
pub mod store;

pub use error::{DatabaseError, RepositoryError};
pub use pool::{create_pool, DatabaseConfig, DatabasePool, DEFAULT_DATABASE_URL};
pub use repositories::{
    CategoryRepository, CountryRepository, OwnerRepository, PokemonRepository, ReferencePolicy,
    ReviewRepository, ReviewerRepository,
};
pub use schema::apply_schema;
pub use store::{Database, MemoryDatabase, MemoryStore, PgStore, Session};
