//! Pokemon categories

use serde::{Deserialize, Serialize};

use core_kernel::{CategoryId, Entity, Row, StoreError, Value};

use crate::naming::name_key;

/// A category pokemon can be filed under (e.g. "Electric")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    /// Creates a category that has not been stored yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::UNASSIGNED,
            name: name.into(),
        }
    }
}

impl Entity for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] = &["id", "name"];
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const GENERATED_ID: bool = true;

    type Key = CategoryId;

    fn key(&self) -> CategoryId {
        self.id
    }

    fn row_id(&self) -> Option<i64> {
        Some(self.id.value())
    }

    fn assign_id(&mut self, id: i64) {
        self.id = CategoryId::new(id);
    }

    fn natural_key(&self) -> Option<String> {
        Some(name_key(&self.name))
    }

    fn to_row(&self) -> Row {
        Row::new(vec![Value::from(self.id.value()), Value::from(self.name.as_str())])
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: CategoryId::new(row.int(0)?),
            name: row.text(1)?,
        })
    }
}
