//! PostgreSQL store
//!
//! Staged commands are rendered to parameterized SQL from the entity's
//! column metadata and buffered per session. `commit` replays them inside a
//! single transaction; foreign keys are declared `DEFERRABLE INITIALLY
//! DEFERRED`, so rows staged in any order only have to be consistent when
//! the transaction commits.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row as _, TypeInfo};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

use core_kernel::{Entity, Row, Store, StoreError, UnitOfWork, Value};

use crate::error::DatabaseError;

#[derive(Debug, Clone)]
struct Command {
    sql: String,
    params: Vec<Value>,
}

/// A session over a PostgreSQL pool
///
/// Clones share the staging buffer; open one session per unit of work.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    pending: Arc<Mutex<Vec<Command>>>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn pending(&self) -> Result<MutexGuard<'_, Vec<Command>>, StoreError> {
        self.pending
            .lock()
            .map_err(|_| StoreError::internal("staging buffer lock poisoned"))
    }

    fn stage(&self, command: Command) -> Result<(), StoreError> {
        debug!(sql = %command.sql, "staging command");
        self.pending()?.push(command);
        Ok(())
    }

    /// Reserves the next value of the table's identity sequence
    async fn reserve_id(&self, table: &str) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar("SELECT nextval(pg_get_serial_sequence($1, 'id'))")
            .bind(table)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(id)
    }
}

/// `a = $1, b = $2` style fragments, numbered from `first`
fn placeholders<'a>(
    columns: impl Iterator<Item = &'a str>,
    first: usize,
    render: impl Fn(&str, usize) -> String,
) -> Vec<String> {
    columns
        .enumerate()
        .map(|(offset, column)| render(column, first + offset))
        .collect()
}

fn column_value<E: Entity>(row: &Row, column: &str) -> Result<Value, StoreError> {
    E::COLUMNS
        .iter()
        .position(|candidate| *candidate == column)
        .and_then(|index| row.values().get(index).cloned())
        .ok_or_else(|| StoreError::internal(format!("{} has no column '{}'", E::TABLE, column)))
}

fn key_params<E: Entity>(row: &Row) -> Result<Vec<Value>, StoreError> {
    E::KEY_COLUMNS
        .iter()
        .map(|column| column_value::<E>(row, column))
        .collect()
}

fn key_filter<E: Entity>(first: usize) -> String {
    placeholders(E::KEY_COLUMNS.iter().copied(), first, |column, n| {
        format!("{} IS NOT DISTINCT FROM ${}", column, n)
    })
    .join(" AND ")
}

fn insert_command<E: Entity>(entity: &E) -> Command {
    let values = placeholders(E::COLUMNS.iter().copied(), 1, |_, n| format!("${}", n));
    Command {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE,
            E::COLUMNS.join(", "),
            values.join(", ")
        ),
        params: entity.to_row().values().to_vec(),
    }
}

fn update_command<E: Entity>(entity: &E) -> Result<Command, StoreError> {
    let row = entity.to_row();
    let columns: Vec<&str> = E::COLUMNS
        .iter()
        .copied()
        .filter(|column| !E::KEY_COLUMNS.contains(column))
        .collect();
    if columns.is_empty() {
        return Err(StoreError::internal(format!(
            "{} has no columns to update",
            E::TABLE
        )));
    }

    let assignments = placeholders(columns.iter().copied(), 1, |column, n| {
        format!("{} = ${}", column, n)
    });
    let mut params = columns
        .iter()
        .map(|column| column_value::<E>(&row, column))
        .collect::<Result<Vec<_>, _>>()?;
    params.extend(key_params::<E>(&row)?);

    Ok(Command {
        sql: format!(
            "UPDATE {} SET {} WHERE {}",
            E::TABLE,
            assignments.join(", "),
            key_filter::<E>(columns.len() + 1)
        ),
        params,
    })
}

fn delete_command<E: Entity>(entity: &E) -> Result<Command, StoreError> {
    Ok(Command {
        sql: format!("DELETE FROM {} WHERE {}", E::TABLE, key_filter::<E>(1)),
        params: key_params::<E>(&entity.to_row())?,
    })
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &Value,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        Value::Int(value) => query.bind(*value),
        Value::Text(value) => query.bind(value.clone()),
        Value::Date(value) => query.bind(*value),
        Value::Null => query.bind(None::<i64>),
    }
}

/// Converts a PostgreSQL row into a store row, column by column
fn decode_row(row: &PgRow) -> Result<Row, StoreError> {
    let mut values = Vec::with_capacity(row.columns().len());
    for column in row.columns() {
        let index = column.ordinal();
        let value = match column.type_info().name() {
            "INT8" => row.try_get::<Option<i64>, _>(index).map(Value::from),
            "INT4" => row.try_get::<Option<i32>, _>(index).map(Value::from),
            "INT2" => row
                .try_get::<Option<i16>, _>(index)
                .map(|value| Value::from(value.map(i64::from))),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
                row.try_get::<Option<String>, _>(index).map(Value::from)
            }
            "DATE" => row
                .try_get::<Option<chrono::NaiveDate>, _>(index)
                .map(Value::from),
            other => {
                return Err(StoreError::decode(format!(
                    "unsupported column type {} for '{}'",
                    other,
                    column.name()
                )))
            }
        }
        .map_err(DatabaseError::from)?;
        values.push(value);
    }
    Ok(Row::new(values))
}

#[async_trait]
impl Store for PgStore {
    #[instrument(skip(self, predicate), fields(table = E::TABLE))]
    async fn find<E, P>(&self, predicate: P) -> Result<Vec<E>, StoreError>
    where
        E: Entity,
        P: Fn(&E) -> bool + Send + Sync,
    {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            E::COLUMNS.join(", "),
            E::TABLE,
            E::KEY_COLUMNS.join(", ")
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        let mut found = Vec::new();
        for row in &rows {
            let entity = E::from_row(&decode_row(row)?)?;
            if predicate(&entity) {
                found.push(entity);
            }
        }
        Ok(found)
    }

    async fn insert<E: Entity>(&self, mut entity: E) -> Result<E, StoreError> {
        if E::GENERATED_ID {
            entity.assign_id(self.reserve_id(E::TABLE).await?);
        }
        self.stage(insert_command(&entity))?;
        Ok(entity)
    }

    async fn update<E: Entity>(&self, entity: E) -> Result<(), StoreError> {
        self.stage(update_command(&entity)?)
    }

    async fn delete<E: Entity>(&self, entity: E) -> Result<(), StoreError> {
        self.stage(delete_command(&entity)?)
    }
}

#[async_trait]
impl UnitOfWork for PgStore {
    #[instrument(skip(self))]
    async fn commit(&self) -> Result<u64, StoreError> {
        let commands = std::mem::take(&mut *self.pending()?);
        if commands.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;
        let mut affected = 0;
        for command in &commands {
            let query = command
                .params
                .iter()
                .fold(sqlx::query(&command.sql), bind_value);
            let result = query.execute(&mut *tx).await.map_err(DatabaseError::from)?;
            affected += result.rows_affected();
        }
        tx.commit().await.map_err(DatabaseError::from)?;

        debug!(affected, commands = commands.len(), "transaction committed");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{OwnerId, PokemonId};
    use domain_catalog::{Category, Pokemon, PokemonOwner};

    #[test]
    fn test_insert_sql() {
        let pokemon = Pokemon::new("Pikachu", NaiveDate::from_ymd_opt(1996, 2, 27).unwrap());
        let command = insert_command(&pokemon);
        assert_eq!(
            command.sql,
            "INSERT INTO pokemon (id, name, birth_date, height, weight) VALUES ($1, $2, $3, $4, $5)"
        );
        assert_eq!(command.params.len(), 5);
    }

    #[test]
    fn test_update_sql_filters_on_key() {
        let command = update_command(&Category::new("Electric")).unwrap();
        assert_eq!(
            command.sql,
            "UPDATE categories SET name = $1 WHERE id IS NOT DISTINCT FROM $2"
        );
        assert_eq!(command.params, vec![Value::from("Electric"), Value::Int(0)]);
    }

    #[test]
    fn test_join_record_cannot_be_updated() {
        let link = PokemonOwner::new(PokemonId::new(1), Some(OwnerId::new(2)));
        assert!(update_command(&link).is_err());
    }

    #[test]
    fn test_delete_sql_matches_null_side() {
        let link = PokemonOwner::new(PokemonId::new(1), None);
        let command = delete_command(&link).unwrap();
        assert_eq!(
            command.sql,
            "DELETE FROM pokemon_owners WHERE pokemon_id IS NOT DISTINCT FROM $1 AND owner_id IS NOT DISTINCT FROM $2"
        );
        assert_eq!(command.params, vec![Value::Int(1), Value::Null]);
    }
}
