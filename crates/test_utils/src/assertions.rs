//! Custom Test Assertions
//!
//! Assertion helpers for repository results with more useful failure
//! messages than a bare `assert!`.

use infra_db::RepositoryError;
use rust_decimal::Decimal;

/// Asserts that a repository mutation committed at least one row
pub fn assert_saved(result: Result<bool, RepositoryError>) {
    match result {
        Ok(true) => {}
        Ok(false) => panic!("Expected the commit to affect rows, it affected none"),
        Err(error) => panic!("Expected the commit to succeed, got error: {}", error),
    }
}

/// Asserts that a repository mutation was rejected as a duplicate of `entity`
pub fn assert_duplicate<T: std::fmt::Debug>(result: Result<T, RepositoryError>, entity: &str) {
    match result {
        Err(RepositoryError::Duplicate { entity: actual, .. }) => assert_eq!(
            actual, entity,
            "Duplicate reported for {} instead of {}",
            actual, entity
        ),
        other => panic!("Expected duplicate {}, got {:?}", entity, other),
    }
}

/// Asserts that the store rejected the commit on a foreign key
pub fn assert_foreign_key_violation<T: std::fmt::Debug>(result: Result<T, RepositoryError>) {
    match result {
        Err(error) if error.is_foreign_key_violation() => {}
        other => panic!("Expected a foreign key violation, got {:?}", other),
    }
}

/// Asserts that a rating equals the expected value exactly, scale ignored
pub fn assert_rating_eq(actual: Decimal, expected: Decimal) {
    assert!(
        actual.normalize() == expected.normalize(),
        "Ratings differ: actual={}, expected={}",
        actual,
        expected
    );
}
