//! Catalog Domain
//!
//! This crate holds the entity model of the pokedex catalog and the pure
//! rules the repositories build on.
//!
//! # Key Concepts
//!
//! - **Pokemon**: the catalogued creature, linked to owners and categories
//! - **Owner / Category**: many-to-many with pokemon through join records
//! - **Country**: every owner belongs to exactly one
//! - **Review / Reviewer**: rated reviews of a pokemon
//! - **Rating**: never stored, always derived from the current reviews
//!
//! # Duplicate Detection
//!
//! Names are compared after trimming surrounding whitespace and upper-casing,
//! so `"Pikachu "` and `"pikachu"` are the same catalog entry.

pub mod category;
pub mod country;
pub mod owner;
pub mod pokemon;
pub mod review;
pub mod reviewer;
pub mod links;
pub mod naming;
pub mod rating;

pub use category::Category;
pub use country::Country;
pub use owner::Owner;
pub use pokemon::Pokemon;
pub use review::Review;
pub use reviewer::Reviewer;
pub use links::{PokemonCategory, PokemonOwner};
pub use naming::{name_key, same_name};
pub use rating::{average_rating, rating_of};
