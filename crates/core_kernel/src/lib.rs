//! Core Kernel - Foundational types for the pokedex catalog
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed numeric identifiers for catalog entities
//! - The relational store contract the repositories are written against
//! - The store error taxonomy

pub mod identifiers;
pub mod store;
pub mod error;

pub use identifiers::{CategoryId, CountryId, OwnerId, PokemonId, ReviewId, ReviewerId};
pub use store::{Entity, Reference, Row, Store, UnitOfWork, Value};
pub use error::StoreError;
