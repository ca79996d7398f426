//! Countries owners come from

use serde::{Deserialize, Serialize};

use core_kernel::{CountryId, Entity, Row, StoreError, Value};

use crate::naming::name_key;

/// A country; every owner belongs to exactly one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CountryId::UNASSIGNED,
            name: name.into(),
        }
    }
}

impl Entity for Country {
    const TABLE: &'static str = "countries";
    const COLUMNS: &'static [&'static str] = &["id", "name"];
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const GENERATED_ID: bool = true;

    type Key = CountryId;

    fn key(&self) -> CountryId {
        self.id
    }

    fn row_id(&self) -> Option<i64> {
        Some(self.id.value())
    }

    fn assign_id(&mut self, id: i64) {
        self.id = CountryId::new(id);
    }

    fn natural_key(&self) -> Option<String> {
        Some(name_key(&self.name))
    }

    fn to_row(&self) -> Row {
        Row::new(vec![Value::from(self.id.value()), Value::from(self.name.as_str())])
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: CountryId::new(row.int(0)?),
            name: row.text(1)?,
        })
    }
}
