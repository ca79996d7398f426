//! Reviews of pokemon

use serde::{Deserialize, Serialize};

use core_kernel::{Entity, PokemonId, Reference, ReviewId, ReviewerId, Row, StoreError, Value};

use crate::naming::name_key;
use crate::pokemon::Pokemon;
use crate::reviewer::Reviewer;

/// A rated review of one pokemon by one reviewer
///
/// Reviews are unique by title. A pokemon cannot be deleted while reviews
/// still point at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub title: String,
    pub text: String,
    pub rating: i32,
    pub pokemon_id: PokemonId,
    pub reviewer_id: ReviewerId,
}

impl Review {
    /// Creates a review not yet attached to a pokemon or reviewer
    pub fn new(title: impl Into<String>, text: impl Into<String>, rating: i32) -> Self {
        Self {
            id: ReviewId::UNASSIGNED,
            title: title.into(),
            text: text.into(),
            rating,
            pokemon_id: PokemonId::UNASSIGNED,
            reviewer_id: ReviewerId::UNASSIGNED,
        }
    }

    /// Attaches the reviewed pokemon and the author
    pub fn attach(mut self, pokemon_id: PokemonId, reviewer_id: ReviewerId) -> Self {
        self.pokemon_id = pokemon_id;
        self.reviewer_id = reviewer_id;
        self
    }
}

impl Entity for Review {
    const TABLE: &'static str = "reviews";
    const COLUMNS: &'static [&'static str] =
        &["id", "title", "text", "rating", "pokemon_id", "reviewer_id"];
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const GENERATED_ID: bool = true;

    type Key = ReviewId;

    fn key(&self) -> ReviewId {
        self.id
    }

    fn row_id(&self) -> Option<i64> {
        Some(self.id.value())
    }

    fn assign_id(&mut self, id: i64) {
        self.id = ReviewId::new(id);
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new(Pokemon::TABLE, self.pokemon_id),
            Reference::new(Reviewer::TABLE, self.reviewer_id),
        ]
    }

    fn natural_key(&self) -> Option<String> {
        Some(name_key(&self.title))
    }

    fn to_row(&self) -> Row {
        Row::new(vec![
            Value::from(self.id.value()),
            Value::from(self.title.as_str()),
            Value::from(self.text.as_str()),
            Value::from(self.rating),
            Value::from(self.pokemon_id.value()),
            Value::from(self.reviewer_id.value()),
        ])
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: ReviewId::new(row.int(0)?),
            title: row.text(1)?,
            text: row.text(2)?,
            rating: row.int32(3)?,
            pokemon_id: PokemonId::new(row.int(4)?),
            reviewer_id: ReviewerId::new(row.int(5)?),
        })
    }
}
