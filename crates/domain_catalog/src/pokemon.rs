//! The catalogued creature

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Entity, PokemonId, Row, StoreError, Value};

use crate::naming::{name_key, same_name};

/// A pokemon in the catalog
///
/// Owners and categories are linked through [`crate::PokemonOwner`] and
/// [`crate::PokemonCategory`]; the rating is derived from reviews on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: PokemonId,
    pub name: String,
    pub birth_date: NaiveDate,
    /// Height in decimetres
    pub height: i32,
    /// Weight in hectograms
    pub weight: i32,
}

impl Pokemon {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Self {
        Self {
            id: PokemonId::UNASSIGNED,
            name: name.into(),
            birth_date,
            height: 0,
            weight: 0,
        }
    }

    pub fn with_measurements(mut self, height: i32, weight: i32) -> Self {
        self.height = height;
        self.weight = weight;
        self
    }

    /// Returns true when `candidate` names the same pokemon, ignoring case and padding
    pub fn is_named(&self, candidate: &str) -> bool {
        same_name(&self.name, candidate)
    }
}

impl Entity for Pokemon {
    const TABLE: &'static str = "pokemon";
    const COLUMNS: &'static [&'static str] = &["id", "name", "birth_date", "height", "weight"];
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const GENERATED_ID: bool = true;

    type Key = PokemonId;

    fn key(&self) -> PokemonId {
        self.id
    }

    fn row_id(&self) -> Option<i64> {
        Some(self.id.value())
    }

    fn assign_id(&mut self, id: i64) {
        self.id = PokemonId::new(id);
    }

    fn natural_key(&self) -> Option<String> {
        Some(name_key(&self.name))
    }

    fn to_row(&self) -> Row {
        Row::new(vec![
            Value::from(self.id.value()),
            Value::from(self.name.as_str()),
            Value::from(self.birth_date),
            Value::from(self.height),
            Value::from(self.weight),
        ])
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: PokemonId::new(row.int(0)?),
            name: row.text(1)?,
            birth_date: row.date(2)?,
            height: row.int32(3)?,
            weight: row.int32(4)?,
        })
    }
}
