//! Join records for the many-to-many relations of pokemon
//!
//! A join record carries only the two foreign identifiers and is identified
//! by the pair. The non-pokemon side is optional: creating a pokemon with an
//! owner or category id that does not resolve links it to nothing rather
//! than failing.

use serde::{Deserialize, Serialize};

use core_kernel::{CategoryId, Entity, OwnerId, PokemonId, Reference, Row, StoreError, Value};

use crate::category::Category;
use crate::owner::Owner;
use crate::pokemon::Pokemon;

/// Links a pokemon to an owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonOwner {
    pub pokemon_id: PokemonId,
    pub owner_id: Option<OwnerId>,
}

impl PokemonOwner {
    pub fn new(pokemon_id: PokemonId, owner_id: Option<OwnerId>) -> Self {
        Self { pokemon_id, owner_id }
    }
}

impl Entity for PokemonOwner {
    const TABLE: &'static str = "pokemon_owners";
    const COLUMNS: &'static [&'static str] = &["pokemon_id", "owner_id"];
    const KEY_COLUMNS: &'static [&'static str] = &["pokemon_id", "owner_id"];

    type Key = (PokemonId, Option<OwnerId>);

    fn key(&self) -> Self::Key {
        (self.pokemon_id, self.owner_id)
    }

    fn references(&self) -> Vec<Reference> {
        let mut references = vec![Reference::new(Pokemon::TABLE, self.pokemon_id)];
        if let Some(owner_id) = self.owner_id {
            references.push(Reference::new(Owner::TABLE, owner_id));
        }
        references
    }

    fn to_row(&self) -> Row {
        Row::new(vec![
            Value::from(self.pokemon_id.value()),
            Value::from(self.owner_id.map(|id| id.value())),
        ])
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            pokemon_id: PokemonId::new(row.int(0)?),
            owner_id: row.opt_int(1)?.map(OwnerId::new),
        })
    }
}

/// Links a pokemon to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonCategory {
    pub pokemon_id: PokemonId,
    pub category_id: Option<CategoryId>,
}

impl PokemonCategory {
    pub fn new(pokemon_id: PokemonId, category_id: Option<CategoryId>) -> Self {
        Self { pokemon_id, category_id }
    }
}

impl Entity for PokemonCategory {
    const TABLE: &'static str = "pokemon_categories";
    const COLUMNS: &'static [&'static str] = &["pokemon_id", "category_id"];
    const KEY_COLUMNS: &'static [&'static str] = &["pokemon_id", "category_id"];

    type Key = (PokemonId, Option<CategoryId>);

    fn key(&self) -> Self::Key {
        (self.pokemon_id, self.category_id)
    }

    fn references(&self) -> Vec<Reference> {
        let mut references = vec![Reference::new(Pokemon::TABLE, self.pokemon_id)];
        if let Some(category_id) = self.category_id {
            references.push(Reference::new(Category::TABLE, category_id));
        }
        references
    }

    fn to_row(&self) -> Row {
        Row::new(vec![
            Value::from(self.pokemon_id.value()),
            Value::from(self.category_id.map(|id| id.value())),
        ])
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            pokemon_id: PokemonId::new(row.int(0)?),
            category_id: row.opt_int(1)?.map(CategoryId::new),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_owner_has_no_owner_reference() {
        let link = PokemonOwner::new(PokemonId::new(1), None);
        assert_eq!(link.references(), vec![Reference::new("pokemon", 1i64)]);

        let decoded = PokemonOwner::from_row(&link.to_row()).unwrap();
        assert_eq!(decoded, link);
    }

    #[test]
    fn test_category_link_references_both_sides() {
        let link = PokemonCategory::new(PokemonId::new(4), Some(CategoryId::new(2)));
        assert_eq!(
            link.references(),
            vec![Reference::new("pokemon", 4i64), Reference::new("categories", 2i64)]
        );
        assert_eq!(link.key(), (PokemonId::new(4), Some(CategoryId::new(2))));
    }
}
