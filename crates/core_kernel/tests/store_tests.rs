//! Tests for the provided methods of the store contract

use async_trait::async_trait;
use std::sync::Mutex;

use core_kernel::{Entity, Row, Store, StoreError, Value};

#[derive(Debug, Clone, PartialEq)]
struct Tag {
    id: i64,
    label: String,
}

impl Entity for Tag {
    const TABLE: &'static str = "tags";
    const COLUMNS: &'static [&'static str] = &["id", "label"];
    const KEY_COLUMNS: &'static [&'static str] = &["id"];

    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn to_row(&self) -> Row {
        Row::new(vec![Value::from(self.id), Value::from(self.label.as_str())])
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row.int(0)?,
            label: row.text(1)?,
        })
    }
}

/// Keeps rows in a vector and records deleted keys
#[derive(Default)]
struct TagStore {
    rows: Mutex<Vec<Row>>,
    deleted: Mutex<Vec<Row>>,
}

#[async_trait]
impl Store for TagStore {
    async fn find<E, P>(&self, predicate: P) -> Result<Vec<E>, StoreError>
    where
        E: Entity,
        P: Fn(&E) -> bool + Send + Sync,
    {
        let rows = self.rows.lock().map_err(|e| StoreError::internal(e.to_string()))?;
        let mut found = Vec::new();
        for row in rows.iter() {
            let entity = E::from_row(row)?;
            if predicate(&entity) {
                found.push(entity);
            }
        }
        Ok(found)
    }

    async fn insert<E: Entity>(&self, entity: E) -> Result<E, StoreError> {
        self.rows
            .lock()
            .map_err(|e| StoreError::internal(e.to_string()))?
            .push(entity.to_row());
        Ok(entity)
    }

    async fn update<E: Entity>(&self, _entity: E) -> Result<(), StoreError> {
        Ok(())
    }

    async fn delete<E: Entity>(&self, entity: E) -> Result<(), StoreError> {
        self.deleted
            .lock()
            .map_err(|e| StoreError::internal(e.to_string()))?
            .push(entity.to_row());
        Ok(())
    }
}

fn tag(id: i64, label: &str) -> Tag {
    Tag {
        id,
        label: label.to_string(),
    }
}

#[tokio::test]
async fn test_find_one_returns_first_match() {
    let store = TagStore::default();
    store.insert(tag(1, "electric")).await.unwrap();
    store.insert(tag(2, "water")).await.unwrap();
    store.insert(tag(3, "water")).await.unwrap();

    let found = store.find_one(|t: &Tag| t.label == "water").await.unwrap();
    assert_eq!(found, Some(tag(2, "water")));

    let missing = store.find_one(|t: &Tag| t.label == "fire").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_delete_batch_deletes_each_entity() {
    let store = TagStore::default();
    store
        .delete_batch(vec![tag(1, "electric"), tag(2, "water")])
        .await
        .unwrap();

    let deleted = store.deleted.lock().unwrap();
    assert_eq!(deleted.len(), 2);
    assert_eq!(deleted[1].int(0).unwrap(), 2);
}

#[tokio::test]
async fn test_delete_batch_of_nothing_is_a_no_op() {
    let store = TagStore::default();
    store.delete_batch(Vec::<Tag>::new()).await.unwrap();
    assert!(store.deleted.lock().unwrap().is_empty());
}
