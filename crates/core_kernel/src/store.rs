//! Relational Store Contract
//!
//! This module defines the persistence contract the repository layer is
//! written against. A store offers predicate queries plus staged commands
//! (`insert`, `update`, `delete`, `delete_batch`) that only become durable
//! when [`UnitOfWork::commit`] is called.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │               Repository Layer                │
//! │  (CategoryRepository, PokemonRepository, ...) │
//! └───────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌───────────────────────────────────────────────┐
//! │            Store + UnitOfWork traits           │
//! │   generic over E: Entity, row codec via Value  │
//! └───────────────────────────────────────────────┘
//!              ▲                       ▲
//!   ┌──────────┴────────┐   ┌──────────┴────────┐
//!   │    MemoryStore    │   │      PgStore      │
//!   │ (snapshot commit) │   │ (sqlx transaction)│
//!   └───────────────────┘   └───────────────────┘
//! ```
//!
//! Entities describe their own table, columns, key and outgoing references
//! through the [`Entity`] trait, so a store never needs to know the concrete
//! domain types it persists.
//!
//! # Usage
//!
//! ```rust,ignore
//! let pikachu = store.insert(pokemon).await?;
//! store.insert(PokemonOwner::new(pikachu.id, Some(owner_id))).await?;
//! let saved = store.commit().await? > 0;
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;

use crate::error::StoreError;

/// A store-neutral column value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// One stored row, values ordered as the entity's `COLUMNS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn get(&self, index: usize) -> Result<&Value, StoreError> {
        self.values
            .get(index)
            .ok_or_else(|| StoreError::decode(format!("missing column at index {}", index)))
    }

    /// Reads a non-null integer column
    pub fn int(&self, index: usize) -> Result<i64, StoreError> {
        match self.get(index)? {
            Value::Int(value) => Ok(*value),
            other => Err(StoreError::decode(format!(
                "expected integer at index {}, found {:?}",
                index, other
            ))),
        }
    }

    /// Reads a non-null integer column that must fit in 32 bits
    pub fn int32(&self, index: usize) -> Result<i32, StoreError> {
        let value = self.int(index)?;
        i32::try_from(value)
            .map_err(|_| StoreError::decode(format!("integer {} at index {} overflows i32", value, index)))
    }

    /// Reads a nullable integer column
    pub fn opt_int(&self, index: usize) -> Result<Option<i64>, StoreError> {
        match self.get(index)? {
            Value::Null => Ok(None),
            _ => self.int(index).map(Some),
        }
    }

    /// Reads a non-null text column
    pub fn text(&self, index: usize) -> Result<String, StoreError> {
        match self.get(index)? {
            Value::Text(value) => Ok(value.clone()),
            other => Err(StoreError::decode(format!(
                "expected text at index {}, found {:?}",
                index, other
            ))),
        }
    }

    /// Reads a non-null date column
    pub fn date(&self, index: usize) -> Result<NaiveDate, StoreError> {
        match self.get(index)? {
            Value::Date(value) => Ok(*value),
            other => Err(StoreError::decode(format!(
                "expected date at index {}, found {:?}",
                index, other
            ))),
        }
    }
}

/// An outgoing foreign key: this row points at `id` in `table`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    pub table: &'static str,
    pub id: i64,
}

impl Reference {
    pub fn new(table: &'static str, id: impl Into<i64>) -> Self {
        Self {
            table,
            id: id.into(),
        }
    }
}

/// A record type a store can persist
///
/// `COLUMNS` lists every persisted column in the order used by [`Entity::to_row`]
/// and [`Entity::from_row`]; `KEY_COLUMNS` is the subset identifying a row.
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    const KEY_COLUMNS: &'static [&'static str];

    /// Whether the store assigns the `id` column on insert
    const GENERATED_ID: bool = false;

    type Key: Copy + Ord + fmt::Debug + Send + Sync + 'static;

    fn key(&self) -> Self::Key;

    /// The store-assigned id, for tables other rows can reference
    fn row_id(&self) -> Option<i64> {
        None
    }

    /// Called by the store when an insert is staged
    fn assign_id(&mut self, _id: i64) {}

    /// Rows this row points at; each must exist when a commit completes
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Normalized value that must be unique within the table
    fn natural_key(&self) -> Option<String> {
        None
    }

    fn to_row(&self) -> Row;

    fn from_row(row: &Row) -> Result<Self, StoreError>;
}

/// Query and staging half of the store contract
///
/// Reads always observe committed state. Staged commands are buffered by the
/// store handle until [`UnitOfWork::commit`].
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns every row of `E` matching the predicate, ordered by key
    async fn find<E, P>(&self, predicate: P) -> Result<Vec<E>, StoreError>
    where
        E: Entity,
        P: Fn(&E) -> bool + Send + Sync;

    /// Returns the first row of `E` matching the predicate
    async fn find_one<E, P>(&self, predicate: P) -> Result<Option<E>, StoreError>
    where
        E: Entity,
        P: Fn(&E) -> bool + Send + Sync,
    {
        Ok(self.find::<E, P>(predicate).await?.into_iter().next())
    }

    /// Stages an insert and returns the entity with its assigned id
    async fn insert<E: Entity>(&self, entity: E) -> Result<E, StoreError>;

    /// Stages a full replace of the row with the entity's key
    async fn update<E: Entity>(&self, entity: E) -> Result<(), StoreError>;

    /// Stages removal of the row with the entity's key
    async fn delete<E: Entity>(&self, entity: E) -> Result<(), StoreError>;

    /// Stages removal of every given row
    async fn delete_batch<E: Entity>(&self, entities: Vec<E>) -> Result<(), StoreError> {
        for entity in entities {
            self.delete(entity).await?;
        }
        Ok(())
    }
}

/// Durability half of the store contract
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Applies every staged change atomically and returns the affected row count
    async fn commit(&self) -> Result<u64, StoreError>;
}
