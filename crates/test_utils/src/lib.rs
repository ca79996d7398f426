//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! pokedex catalog test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built catalog entities
//! - `builders`: Builder patterns for pokemon, owners and reviews
//! - `database`: Seeded in-memory catalogs and PostgreSQL test containers
//! - `assertions`: Assertion helpers for repository results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
