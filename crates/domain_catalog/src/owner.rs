//! Pokemon owners

use serde::{Deserialize, Serialize};

use core_kernel::{CountryId, Entity, OwnerId, Reference, Row, StoreError, Value};

use crate::country::Country;
use crate::naming::name_key;

/// A trainer owning pokemon
///
/// Owners are unique by last name. Each owner belongs to exactly one country;
/// the link to pokemon goes through [`crate::PokemonOwner`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub first_name: String,
    pub last_name: String,
    /// Gym the owner trains at
    pub gym: String,
    pub country_id: CountryId,
}

impl Owner {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gym: impl Into<String>,
        country_id: CountryId,
    ) -> Self {
        Self {
            id: OwnerId::UNASSIGNED,
            first_name: first_name.into(),
            last_name: last_name.into(),
            gym: gym.into(),
            country_id,
        }
    }

    /// Returns "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Owner {
    const TABLE: &'static str = "owners";
    const COLUMNS: &'static [&'static str] = &["id", "first_name", "last_name", "gym", "country_id"];
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const GENERATED_ID: bool = true;

    type Key = OwnerId;

    fn key(&self) -> OwnerId {
        self.id
    }

    fn row_id(&self) -> Option<i64> {
        Some(self.id.value())
    }

    fn assign_id(&mut self, id: i64) {
        self.id = OwnerId::new(id);
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new(Country::TABLE, self.country_id)]
    }

    fn natural_key(&self) -> Option<String> {
        Some(name_key(&self.last_name))
    }

    fn to_row(&self) -> Row {
        Row::new(vec![
            Value::from(self.id.value()),
            Value::from(self.first_name.as_str()),
            Value::from(self.last_name.as_str()),
            Value::from(self.gym.as_str()),
            Value::from(self.country_id.value()),
        ])
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: OwnerId::new(row.int(0)?),
            first_name: row.text(1)?,
            last_name: row.text(2)?,
            gym: row.text(3)?,
            country_id: CountryId::new(row.int(4)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_references_country() {
        let owner = Owner::new("Ash", "Ketchum", "Pallet Gym", CountryId::new(3));
        assert_eq!(owner.references(), vec![Reference::new("countries", 3i64)]);
        assert_eq!(owner.natural_key().as_deref(), Some("KETCHUM"));
        assert_eq!(owner.full_name(), "Ash Ketchum");
    }

    #[test]
    fn test_row_codec() {
        let mut owner = Owner::new("Misty", "Waterflower", "Cerulean Gym", CountryId::new(1));
        owner.assign_id(9);
        let decoded = Owner::from_row(&owner.to_row()).unwrap();
        assert_eq!(decoded, owner);
    }
}
