//! Database and repository error types
//!
//! `DatabaseError` classifies failures raised by PostgreSQL through SQLx and
//! converts into the store-neutral [`StoreError`]. `RepositoryError` is what
//! repository operations return: a store fault, or one of the catalog rules
//! enforced before anything is written.

use core_kernel::StoreError;
use thiserror::Error;

/// Errors that can occur during PostgreSQL operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Transaction could not be started or committed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// A row could not be decoded
    #[error("Decode error: {0}")]
    DecodeFailed(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_) | DatabaseError::ForeignKeyViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Converts SQLx errors to more specific DatabaseError variants
///
/// Database errors are classified by their PostgreSQL SQLSTATE code.
impl From<&sqlx::Error> for DatabaseError {
    fn from(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(io) => DatabaseError::ConnectionFailed(io.to_string()),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DatabaseError::DecodeFailed(error.to_string())
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    Some("23505") => DatabaseError::DuplicateEntry(db_err.message().to_string()),
                    Some("23503") => {
                        DatabaseError::ForeignKeyViolation(db_err.message().to_string())
                    }
                    Some("40001") | Some("40P01") => {
                        DatabaseError::TransactionFailed(db_err.message().to_string())
                    }
                    _ => DatabaseError::QueryFailed(db_err.message().to_string()),
                }
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        DatabaseError::from(&error)
    }
}

impl From<DatabaseError> for StoreError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::ConnectionFailed(message) => StoreError::Connection(message),
            DatabaseError::PoolExhausted => {
                StoreError::Connection("connection pool exhausted".to_string())
            }
            DatabaseError::DuplicateEntry(message) => StoreError::UniqueViolation(message),
            DatabaseError::ForeignKeyViolation(message) => StoreError::ForeignKeyViolation(message),
            DatabaseError::DecodeFailed(message) => StoreError::Decode(message),
            DatabaseError::QueryFailed(message) | DatabaseError::TransactionFailed(message) => {
                StoreError::Query(message)
            }
        }
    }
}

/// Errors returned by repository operations
///
/// A commit that affects no rows is not an error: repositories report it as
/// `Ok(false)`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store failed or rejected the commit
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A name-equivalent entity already exists
    #[error("{entity} '{value}' already exists")]
    Duplicate {
        entity: &'static str,
        /// The name the rejected write carried
        value: String,
        /// Id of the existing entity when the pre-write check found it
        existing: Option<i64>,
    },

    /// A referenced entity does not exist (strict reference policy only)
    #[error("{entity} with id {id} does not exist")]
    MissingReference { entity: &'static str, id: i64 },
}

impl RepositoryError {
    /// Creates a duplicate error for an entity found by the pre-write check
    pub fn duplicate(entity: &'static str, value: impl Into<String>, existing: impl Into<i64>) -> Self {
        RepositoryError::Duplicate {
            entity,
            value: value.into(),
            existing: Some(existing.into()),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, RepositoryError::Duplicate { .. })
    }

    /// Checks if the store rejected the commit on a foreign key
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, RepositoryError::Store(StoreError::ForeignKeyViolation(_)))
    }
}
