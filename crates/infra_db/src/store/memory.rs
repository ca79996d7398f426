//! In-memory relational store
//!
//! `MemoryDatabase` holds the committed tables and per-table id sequences
//! behind one lock; `MemoryStore` is a session over it with its own staging
//! buffer. A commit replays the staged changes on a snapshot of the tables,
//! checks every foreign key and natural key, and only then swaps the snapshot
//! in, so a failing commit leaves the database untouched.
//!
//! Sequences are not rolled back: an id handed out by a staged insert is
//! burnt even if the commit fails, as with PostgreSQL identity columns.

use async_trait::async_trait;
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use core_kernel::{Entity, Reference, Store, StoreError, UnitOfWork};

/// Type-erased view of one table, used for snapshots and integrity checks
trait Table: Send + Sync {
    fn clone_table(&self) -> Box<dyn Table>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn row_ids(&self) -> BTreeSet<i64>;
    fn references(&self) -> Vec<Reference>;
    fn duplicate_natural_key(&self) -> Option<String>;
}

struct Rows<E: Entity> {
    rows: BTreeMap<E::Key, E>,
}

impl<E: Entity> Default for Rows<E> {
    fn default() -> Self {
        Self { rows: BTreeMap::new() }
    }
}

impl<E: Entity> Table for Rows<E> {
    fn clone_table(&self) -> Box<dyn Table> {
        Box::new(Rows::<E> {
            rows: self.rows.clone(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn row_ids(&self) -> BTreeSet<i64> {
        self.rows.values().filter_map(E::row_id).collect()
    }

    fn references(&self) -> Vec<Reference> {
        self.rows.values().flat_map(E::references).collect()
    }

    fn duplicate_natural_key(&self) -> Option<String> {
        let mut seen = BTreeSet::new();
        self.rows
            .values()
            .filter_map(E::natural_key)
            .find(|key| !seen.insert(key.clone()))
    }
}

#[derive(Default)]
struct Tables {
    tables: HashMap<&'static str, Box<dyn Table>>,
}

impl Clone for Tables {
    fn clone(&self) -> Self {
        Self {
            tables: self
                .tables
                .iter()
                .map(|(name, table)| (*name, table.clone_table()))
                .collect(),
        }
    }
}

impl Tables {
    fn rows<E: Entity>(&self) -> Option<&BTreeMap<E::Key, E>> {
        self.tables
            .get(E::TABLE)
            .and_then(|table| table.as_any().downcast_ref::<Rows<E>>())
            .map(|table| &table.rows)
    }

    fn rows_mut<E: Entity>(&mut self) -> Result<&mut BTreeMap<E::Key, E>, StoreError> {
        self.tables
            .entry(E::TABLE)
            .or_insert_with(|| Box::new(Rows::<E>::default()))
            .as_any_mut()
            .downcast_mut::<Rows<E>>()
            .map(|table| &mut table.rows)
            .ok_or_else(|| {
                StoreError::internal(format!("table '{}' holds another entity type", E::TABLE))
            })
    }

    /// Verifies every reference resolves and every natural key is unique
    fn check_integrity(&self) -> Result<(), StoreError> {
        let ids: HashMap<&str, BTreeSet<i64>> = self
            .tables
            .iter()
            .map(|(name, table)| (*name, table.row_ids()))
            .collect();

        for (name, table) in &self.tables {
            for reference in table.references() {
                let resolved = ids
                    .get(reference.table)
                    .map_or(false, |table_ids| table_ids.contains(&reference.id));
                if !resolved {
                    return Err(StoreError::ForeignKeyViolation(format!(
                        "{} references missing {} id {}",
                        name, reference.table, reference.id
                    )));
                }
            }

            if let Some(key) = table.duplicate_natural_key() {
                return Err(StoreError::UniqueViolation(format!(
                    "{} holds '{}' more than once",
                    name, key
                )));
            }
        }

        Ok(())
    }
}

type Change = Box<dyn FnOnce(&mut Tables) -> Result<u64, StoreError> + Send>;

#[derive(Default)]
struct Inner {
    tables: Tables,
    sequences: HashMap<&'static str, i64>,
}

/// Shared in-memory database; cheap to clone, clones see the same tables
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session with an empty staging buffer
    pub fn session(&self) -> MemoryStore {
        MemoryStore {
            database: self.clone(),
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of committed rows of `E`
    pub fn count<E: Entity>(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.tables.rows::<E>().map_or(0, BTreeMap::len))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::internal("memory database lock poisoned"))
    }

    fn next_id(&self, table: &'static str) -> Result<i64, StoreError> {
        let mut inner = self.lock()?;
        let sequence = inner.sequences.entry(table).or_insert(0);
        *sequence += 1;
        Ok(*sequence)
    }
}

impl std::fmt::Debug for MemoryDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDatabase").finish_non_exhaustive()
    }
}

/// A session over a [`MemoryDatabase`]
///
/// Clones share the staging buffer, so repositories built from clones of one
/// session stage into the same unit of work.
#[derive(Clone)]
pub struct MemoryStore {
    database: MemoryDatabase,
    pending: Arc<Mutex<Vec<Change>>>,
}

impl MemoryStore {
    /// Opens a session over a fresh, empty database
    pub fn new() -> Self {
        MemoryDatabase::new().session()
    }

    pub fn database(&self) -> &MemoryDatabase {
        &self.database
    }

    /// Number of staged, uncommitted changes
    pub fn pending_changes(&self) -> Result<usize, StoreError> {
        Ok(self.pending()?.len())
    }

    fn pending(&self) -> Result<MutexGuard<'_, Vec<Change>>, StoreError> {
        self.pending
            .lock()
            .map_err(|_| StoreError::internal("staging buffer lock poisoned"))
    }

    fn stage(&self, change: Change) -> Result<(), StoreError> {
        self.pending()?.push(change);
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find<E, P>(&self, predicate: P) -> Result<Vec<E>, StoreError>
    where
        E: Entity,
        P: Fn(&E) -> bool + Send + Sync,
    {
        let inner = self.database.lock()?;
        Ok(inner
            .tables
            .rows::<E>()
            .map(|rows| rows.values().filter(|row| predicate(row)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert<E: Entity>(&self, mut entity: E) -> Result<E, StoreError> {
        if E::GENERATED_ID {
            entity.assign_id(self.database.next_id(E::TABLE)?);
        }
        debug!(table = E::TABLE, key = ?entity.key(), "staging insert");

        let row = entity.clone();
        self.stage(Box::new(move |tables: &mut Tables| {
            let rows = tables.rows_mut::<E>()?;
            let key = row.key();
            if rows.contains_key(&key) {
                return Err(StoreError::UniqueViolation(format!(
                    "{} already holds key {:?}",
                    E::TABLE,
                    key
                )));
            }
            rows.insert(key, row);
            Ok(1)
        }))?;

        Ok(entity)
    }

    async fn update<E: Entity>(&self, entity: E) -> Result<(), StoreError> {
        debug!(table = E::TABLE, key = ?entity.key(), "staging update");
        self.stage(Box::new(move |tables: &mut Tables| {
            let rows = tables.rows_mut::<E>()?;
            match rows.get_mut(&entity.key()) {
                Some(existing) => {
                    *existing = entity;
                    Ok(1)
                }
                None => Ok(0),
            }
        }))
    }

    async fn delete<E: Entity>(&self, entity: E) -> Result<(), StoreError> {
        debug!(table = E::TABLE, key = ?entity.key(), "staging delete");
        let key = entity.key();
        self.stage(Box::new(move |tables: &mut Tables| {
            let removed = tables.rows_mut::<E>()?.remove(&key);
            Ok(u64::from(removed.is_some()))
        }))
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    async fn commit(&self) -> Result<u64, StoreError> {
        let changes = std::mem::take(&mut *self.pending()?);
        if changes.is_empty() {
            return Ok(0);
        }

        let mut inner = self.database.lock()?;
        let mut snapshot = inner.tables.clone();
        let mut affected = 0;
        for change in changes {
            affected += change(&mut snapshot)?;
        }
        snapshot.check_integrity()?;
        inner.tables = snapshot;

        debug!(affected, "memory commit applied");
        Ok(affected)
    }
}
