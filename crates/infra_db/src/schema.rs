//! Catalog schema bootstrap

use sqlx::PgPool;
use tracing::info;

use crate::error::DatabaseError;

/// DDL for the catalog tables; every statement is idempotent
pub const CATALOG_SCHEMA: &str = include_str!("../../../migrations/0001_catalog_schema.sql");

/// Creates any missing catalog table, constraint or index
pub async fn apply_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    info!("applying catalog schema");
    sqlx::raw_sql(CATALOG_SCHEMA).execute(pool).await?;
    Ok(())
}
