//! Store error types shared by every store implementation

use thiserror::Error;

/// Errors a relational store can report
///
/// A commit that affects zero rows is not an error; it is reported as a
/// count of `0`. These variants cover faults and constraint violations that
/// abort a commit as a whole.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// A query or command failed to execute
    #[error("Query failed: {0}")]
    Query(String),

    /// A row references a row that does not exist, or a referenced row was deleted
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Two rows share a key that must be unique
    #[error("Unique violation: {0}")]
    UniqueViolation(String),

    /// A stored row could not be decoded into an entity
    #[error("Decode error: {0}")]
    Decode(String),

    /// Internal store failure
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn decode(message: impl Into<String>) -> Self {
        StoreError::Decode(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal(message.into())
    }

    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::ForeignKeyViolation(_) | StoreError::UniqueViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}
