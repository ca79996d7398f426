//! Reviewers

use serde::{Deserialize, Serialize};

use core_kernel::{Entity, ReviewerId, Row, StoreError, Value};

use crate::naming::name_key;

/// Someone who writes reviews; unique by last name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub id: ReviewerId,
    pub first_name: String,
    pub last_name: String,
}

impl Reviewer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: ReviewerId::UNASSIGNED,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Entity for Reviewer {
    const TABLE: &'static str = "reviewers";
    const COLUMNS: &'static [&'static str] = &["id", "first_name", "last_name"];
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const GENERATED_ID: bool = true;

    type Key = ReviewerId;

    fn key(&self) -> ReviewerId {
        self.id
    }

    fn row_id(&self) -> Option<i64> {
        Some(self.id.value())
    }

    fn assign_id(&mut self, id: i64) {
        self.id = ReviewerId::new(id);
    }

    fn natural_key(&self) -> Option<String> {
        Some(name_key(&self.last_name))
    }

    fn to_row(&self) -> Row {
        Row::new(vec![
            Value::from(self.id.value()),
            Value::from(self.first_name.as_str()),
            Value::from(self.last_name.as_str()),
        ])
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: ReviewerId::new(row.int(0)?),
            first_name: row.text(1)?,
            last_name: row.text(2)?,
        })
    }
}
