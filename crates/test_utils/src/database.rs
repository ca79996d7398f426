//! Database Test Utilities
//!
//! Seeded in-memory catalogs for repository and handler tests, and a
//! PostgreSQL test container for exercising `PgStore`.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use core_kernel::{Store, StoreError, UnitOfWork};
use domain_catalog::{Category, Country, Owner, Pokemon, PokemonCategory, PokemonOwner, Reviewer};
use infra_db::{apply_schema, MemoryDatabase, MemoryStore};

use crate::fixtures::CatalogFixtures;

/// Default PostgreSQL image for testing
const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "pokedex_test";

/// Rows committed by [`seed_catalog`]
#[derive(Debug, Clone)]
pub struct SeededCatalog {
    pub country: Country,
    pub owner: Owner,
    pub category: Category,
    pub pokemon: Pokemon,
    pub reviewer: Reviewer,
}

/// Commits one country, owner, category, reviewer and a linked pikachu
///
/// Rows are inserted straight through the store so repository tests start
/// from a known state without depending on the code under test.
pub async fn seed_catalog<S: Store + UnitOfWork>(store: &S) -> Result<SeededCatalog, StoreError> {
    let country = store.insert(CatalogFixtures::kanto()).await?;
    let owner = store.insert(CatalogFixtures::jack(country.id)).await?;
    let category = store.insert(CatalogFixtures::electric()).await?;
    let reviewer = store.insert(CatalogFixtures::teddy()).await?;
    let pokemon = store.insert(CatalogFixtures::pikachu()).await?;
    store.insert(PokemonOwner::new(pokemon.id, Some(owner.id))).await?;
    store
        .insert(PokemonCategory::new(pokemon.id, Some(category.id)))
        .await?;
    store.commit().await?;

    Ok(SeededCatalog {
        country,
        owner,
        category,
        pokemon,
        reviewer,
    })
}

/// Creates a fresh in-memory database holding the [`seed_catalog`] rows
pub async fn seeded_memory_database() -> Result<(MemoryDatabase, SeededCatalog), StoreError> {
    let database = MemoryDatabase::new();
    let seeded = seed_catalog(&database.session()).await?;
    Ok((database, seeded))
}

/// Opens a session over a fresh, seeded in-memory database
pub async fn seeded_memory_store() -> Result<(MemoryStore, SeededCatalog), StoreError> {
    let (database, seeded) = seeded_memory_database().await?;
    Ok((database.session(), seeded))
}

/// Configuration for test database
#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for TestDatabaseConfig {
    fn default() -> Self {
        Self {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

impl TestDatabaseConfig {
    /// Creates the database connection URL
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// A PostgreSQL test container with the catalog schema applied
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub config: TestDatabaseConfig,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container for testing
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or the schema fails to apply
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let config = TestDatabaseConfig {
            host: container.get_host().await?.to_string(),
            port: container.get_host_port_ipv4(5432).await?,
            ..TestDatabaseConfig::default()
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.connection_url())
            .await?;

        apply_schema(&pool).await?;

        Ok(Self {
            _container: container,
            config,
            pool,
        })
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Removes every catalog row while keeping the schema
    pub async fn clear_data(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "TRUNCATE TABLE pokemon_owners, pokemon_categories, reviews, reviewers, \
             pokemon, owners, categories, countries RESTART IDENTITY",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
